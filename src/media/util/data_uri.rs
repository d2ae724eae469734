use mime::Mime;
use regex::Regex;

use crate::app::errors::PipelineError;

lazy_static! {
    static ref DATA_URI_REGEX: Regex =
        Regex::new(r"(?s)^data:([^;,]+)((?:;[^;,]*)*);base64,(.*)$").unwrap();
}

/// A decoded `data:<mime>;base64,<payload>` string.
#[derive(Debug)]
pub struct DataUri {
    pub mime_type: Mime,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn parse(uri: &str) -> Result<Self, PipelineError> {
        let Some(captures) = DATA_URI_REGEX.captures(uri.trim()) else {
            return Err(PipelineError::Decode(
                "output is not a base64 data uri".to_string(),
            ));
        };

        let mime_type: Mime = captures[1]
            .trim()
            .parse()
            .map_err(|_| PipelineError::Decode(format!("unknown mime type {}", &captures[1])))?;

        let data = base64::decode(captures[3].trim())
            .map_err(|e| PipelineError::Decode(e.to_string()))?;

        Ok(DataUri { mime_type, data })
    }

    pub fn extension(&self) -> &'static str {
        extension_from_mime(&self.mime_type)
    }
}

pub fn extension_from_mime(mime_type: &Mime) -> &'static str {
    match (mime_type.type_().as_str(), mime_type.subtype().as_str()) {
        ("video", "mp4") => "mp4",
        ("video", "webm") => "webm",
        ("video", "quicktime") => "mov",
        ("video", "x-msvideo") => "avi",
        ("video", "mpeg") => "mpg",
        ("video", "x-matroska") => "mkv",
        ("image", "gif") => "gif",
        ("image", "png") => "png",
        ("image", "jpeg") => "jpg",
        ("image", "webp") => "webp",
        _ => "bin",
    }
}
