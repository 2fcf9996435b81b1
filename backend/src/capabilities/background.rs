use super::{BackgroundRemover, CapabilityError};
use crate::data_url;
use image::{DynamicImage, ImageFormat};
use log::debug;
use std::io::Cursor;
use std::thread;
use std::time::Duration;

const STAGES: [(u32, &str); 5] = [
    (20, "Loading image"),
    (40, "Analyzing objects"),
    (60, "Detecting edges"),
    (80, "Removing background"),
    (100, "Finalizing"),
];

/// Makes near-white pixels transparent. Anything that is not a base64 data
/// URL is handed back untouched.
#[derive(Clone, Copy, Debug)]
pub struct LumaKeyRemover {
    /// Pixels whose luma is at or above this value become transparent.
    pub threshold: u8,
}

impl Default for LumaKeyRemover {
    fn default() -> Self {
        Self { threshold: 240 }
    }
}

impl LumaKeyRemover {
    pub fn apply(&self, image: &str) -> Result<String, CapabilityError> {
        if !image.starts_with("data:") {
            return Ok(image.to_string());
        }
        let (_, bytes) = data_url::decode(image).map_err(CapabilityError::BackgroundRemoval)?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| CapabilityError::BackgroundRemoval(e.to_string()))?;

        let mut rgba = decoded.to_rgba8();
        for pixel in rgba.pixels_mut() {
            let [r, g, b, _] = pixel.0;
            let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8;
            if luma >= self.threshold {
                pixel.0[3] = 0;
            }
        }

        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| CapabilityError::BackgroundRemoval(e.to_string()))?;
        Ok(data_url::encode("image/png", &out.into_inner()))
    }
}

/// Runs a [`LumaKeyRemover`] while reporting fixed progress stages, pausing
/// `step_delay` before each one.
pub struct StagedBackgroundRemover {
    key: LumaKeyRemover,
    step_delay: Duration,
}

impl StagedBackgroundRemover {
    pub fn new(key: LumaKeyRemover, step_delay: Duration) -> Self {
        Self { key, step_delay }
    }
}

impl BackgroundRemover for StagedBackgroundRemover {
    fn remove_background(
        &self,
        image: &str,
        progress: &dyn Fn(u32),
    ) -> Result<String, CapabilityError> {
        let mut result = None;
        for (percent, stage) in STAGES {
            if !self.step_delay.is_zero() {
                thread::sleep(self.step_delay);
            }
            if percent == 80 {
                result = Some(self.key.apply(image)?);
            }
            debug!("Background removal: {} ({}%)", stage, percent);
            progress(percent);
        }
        match result {
            Some(image) => Ok(image),
            None => self.key.apply(image),
        }
    }
}
