//! Diagram request pipeline.
//!
//! ```text
//! encoded segment ─▶ decode ─▶ Dispatcher ─(kind, format, source)─▶ Renderer ─▶ bytes
//!                                  │
//!                     explicit route kind, or sniffed keyword
//! ```
//!
//! | Module     | Purpose                                         |
//! |------------|-------------------------------------------------|
//! | `decode`   | base64url + zlib codec with a size cap          |
//! | `dispatch` | kind selection and renderer invocation          |
//! | `error`    | `ApiError` taxonomy and JSON envelope           |
//! | `format`   | output formats and their framing headers        |
//! | `kind`     | diagram dialects and keyword sniffing           |
//! | `render`   | `Renderer` trait and the command-line backend   |

mod decode;
mod dispatch;
mod error;
mod format;
mod kind;
mod render;

pub use decode::{decode, encode};
pub use dispatch::{Dispatcher, Rendered};
pub use error::{ApiError, DecodeError, GenerateError, Payload, RenderError};
pub use format::OutputFormat;
pub use kind::DiagramKind;
pub use render::{CommandRenderer, Renderer};
