//! Request path to diagram route resolution.
//!
//! Two shapes are served:
//!
//! ```text
//! /<kind>/<format>/<encoded>    kind taken from the path
//! /<format>/<encoded>           kind sniffed from the decoded source
//! ```

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::diagram::DiagramKind;

/// A matched diagram route. The path is percent-decoded before it is split,
/// so an encoded `%2F` separates segments like a literal `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Explicit {
        kind: DiagramKind,
        format: String,
        encoded: String,
    },
    Sniffed {
        format: String,
        encoded: String,
    },
}

impl Route {
    /// Match a request URL. `None` means no route (404).
    pub fn parse(url: &str) -> Option<Self> {
        let path = url.split_once('?').map_or(url, |(path, _)| path);
        let path = decode_path(path);
        let path = path.strip_prefix('/')?;

        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        match segments.as_slice() {
            [kind, format, encoded] => Some(Self::Explicit {
                kind: DiagramKind::from_route(kind)?,
                format: format.to_string(),
                encoded: encoded.to_string(),
            }),
            [format, encoded] => Some(Self::Sniffed {
                format: format.to_string(),
                encoded: encoded.to_string(),
            }),
            _ => None,
        }
    }

    /// Requested output format segment.
    pub fn format(&self) -> &str {
        match self {
            Self::Explicit { format, .. } | Self::Sniffed { format, .. } => format,
        }
    }
}

/// Percent-decode the path, keeping it raw when the result isn't UTF-8.
fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path))
}
