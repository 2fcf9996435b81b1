use chrono::{DateTime, Utc};

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<subject>_<template>_<millis>.<ext>`. Two exports in the same millisecond
/// get the same name.
pub fn export_filename(subject: &str, template_name: &str, now: DateTime<Utc>, ext: &str) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize(subject),
        sanitize(template_name),
        now.timestamp_millis(),
        ext
    )
}
