//! MIME type constants for response framing.

/// Content types served by the diagram endpoints.
pub mod types {
    pub const JSON: &str = "application/json";
    pub const PDF: &str = "application/pdf";
    pub const PNG: &str = "image/png";
    /// SVG is text; declare the charset so clients don't guess.
    pub const SVG_UTF8: &str = "image/svg+xml; charset=utf-8";
}
