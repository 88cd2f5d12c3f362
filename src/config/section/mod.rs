//! Configuration section definitions.
//!
//! Each module corresponds to a section in `diagserve.toml`:
//!
//! | Module   | TOML Section | Purpose                            |
//! |----------|--------------|------------------------------------|
//! | `render` | `[render]`   | Diagram tool commands and options  |
//! | `serve`  | `[serve]`    | HTTP server and request limits     |

mod render;
mod serve;

pub use render::RenderConfig;
pub use serve::ServeConfig;
