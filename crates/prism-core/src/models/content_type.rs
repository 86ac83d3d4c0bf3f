use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PrismError;

/// Content type of an indexed chunk.
///
/// A closed set: every dispatch on content type is an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Markdown,
    PlainText,
    Code,
    Html,
    Pdf,
    RasterImage,
    Video,
    Audio,
    OfficeDocument,
}

impl ContentType {
    pub const ALL: [ContentType; 9] = [
        ContentType::Markdown,
        ContentType::PlainText,
        ContentType::Code,
        ContentType::Html,
        ContentType::Pdf,
        ContentType::RasterImage,
        ContentType::Video,
        ContentType::Audio,
        ContentType::OfficeDocument,
    ];

    /// Non-text types searched by the multi-modal fan-out, in fan-out order.
    pub const MULTI_MODAL: [ContentType; 5] = [
        ContentType::Video,
        ContentType::Audio,
        ContentType::RasterImage,
        ContentType::Pdf,
        ContentType::OfficeDocument,
    ];

    pub fn is_multi_modal(self) -> bool {
        match self {
            ContentType::Markdown | ContentType::PlainText | ContentType::Code | ContentType::Html => {
                false
            }
            ContentType::Pdf
            | ContentType::RasterImage
            | ContentType::Video
            | ContentType::Audio
            | ContentType::OfficeDocument => true,
        }
    }

    /// Cross-modal weight used when comparing relevance across modalities.
    /// Text is the reference modality at 1.0.
    pub fn cross_modal_weight(self) -> f64 {
        match self {
            ContentType::Markdown | ContentType::PlainText | ContentType::Html => 1.0,
            ContentType::Code => 0.9,
            ContentType::Pdf | ContentType::OfficeDocument => 0.9,
            ContentType::RasterImage => 0.8,
            ContentType::Video => 0.7,
            ContentType::Audio => 0.7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Markdown => "markdown",
            ContentType::PlainText => "plain_text",
            ContentType::Code => "code",
            ContentType::Html => "html",
            ContentType::Pdf => "pdf",
            ContentType::RasterImage => "raster_image",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::OfficeDocument => "office_document",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = PrismError;

    /// Case-insensitive; accepts `-` or `_` separators and a few common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let parsed = match normalized.as_str() {
            "markdown" | "md" => ContentType::Markdown,
            "plain_text" | "text" | "txt" => ContentType::PlainText,
            "code" | "source" => ContentType::Code,
            "html" | "web" => ContentType::Html,
            "pdf" => ContentType::Pdf,
            "raster_image" | "image" | "png" | "jpeg" | "jpg" => ContentType::RasterImage,
            "video" => ContentType::Video,
            "audio" => ContentType::Audio,
            "office_document" | "office" | "docx" | "xlsx" | "pptx" => ContentType::OfficeDocument,
            _ => {
                return Err(PrismError::InvalidContentType {
                    value: s.to_string(),
                })
            }
        };
        Ok(parsed)
    }
}
