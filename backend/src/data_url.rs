//! `data:<mime>;base64,<payload>` image references.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URL: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(r"^data:(?P<mime>[\w.+-]+/[\w.+-]+)?(?:;[\w-]+=[\w.-]+)*;base64,(?P<data>.*)$")
});

/// Decodes a base64 data URL into `(mime, bytes)`.
pub fn decode(url: &str) -> Result<(String, Vec<u8>), String> {
    let re = DATA_URL
        .as_ref()
        .map_err(|e| format!("Regex error: {}", e))?;
    let caps = re
        .captures(url.trim())
        .ok_or_else(|| "not a base64 data URL".to_string())?;
    let mime = caps
        .name("mime")
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let payload = caps.name("data").map(|m| m.as_str()).unwrap_or_default();
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| format!("invalid base64 payload: {}", e))?;
    Ok((mime, bytes))
}

pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_what_it_encodes() {
        let url = encode("image/png", b"abc");
        assert_eq!(url, "data:image/png;base64,YWJj");
        assert_eq!(decode(&url).unwrap(), ("image/png".to_string(), b"abc".to_vec()));
    }

    #[test]
    fn rejects_plain_urls() {
        assert!(decode("https://example.com/a.png").is_err());
        assert!(decode("data:image/png;base64,@@@").is_err());
    }
}
