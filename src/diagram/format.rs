//! Output formats and their response framing.

use std::{fmt, str::FromStr};

use super::ApiError;
use crate::utils::mime::types;

/// Image encoding requested for the response body.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    PNG,
    SVG,
    PDF,
}

impl OutputFormat {
    /// Canonical lowercase name, as passed to the renderer.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::PNG => "png",
            Self::SVG => "svg",
            Self::PDF => "pdf",
        }
    }

    /// `Content-Type` header value.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::PNG => types::PNG,
            Self::SVG => types::SVG_UTF8,
            Self::PDF => types::PDF,
        }
    }

    /// `Content-Disposition` header value, if the format carries a filename hint.
    pub const fn disposition(self) -> Option<&'static str> {
        match self {
            Self::PNG => Some("inline; filename=result.png"),
            Self::PDF => Some("inline; filename=result.pdf"),
            Self::SVG => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    /// Case-insensitive parse of a route segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::PNG),
            "svg" => Ok(Self::SVG),
            "pdf" => Ok(Self::PDF),
            _ => Err(ApiError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
