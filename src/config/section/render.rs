//! `[render]` section configuration.
//!
//! Commands used to lay out each diagram dialect.
//!
//! # Example
//!
//! ```toml
//! [render]
//! blockdiag = ["blockdiag"]                       # program + leading args
//! seqdiag = ["python3", "-m", "seqdiag.command"]
//! actdiag = ["actdiag"]
//! nwdiag = ["nwdiag"]
//! font = "/usr/share/fonts/truetype/ipafont/ipag.ttf"
//! antialias = true
//! ```
//!
//! Each tool is invoked as
//! `<command...> -T <format> [-a] [-f <font>] -o <output> <source>`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::diagram::DiagramKind;

/// Diagram tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub blockdiag: Vec<String>,
    pub seqdiag: Vec<String>,
    pub actdiag: Vec<String>,
    pub nwdiag: Vec<String>,

    /// TrueType font passed to every tool (`-f`).
    pub font: Option<PathBuf>,

    /// Pass `-a` (antialias) to every tool.
    pub antialias: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            blockdiag: vec!["blockdiag".to_string()],
            seqdiag: vec!["seqdiag".to_string()],
            actdiag: vec!["actdiag".to_string()],
            nwdiag: vec!["nwdiag".to_string()],
            font: None,
            antialias: false,
        }
    }
}

impl RenderConfig {
    /// Configured command for each diagram kind, in sniffing order.
    pub fn commands(&self) -> [(DiagramKind, &[String]); 4] {
        [
            (DiagramKind::Block, self.blockdiag.as_slice()),
            (DiagramKind::Sequence, self.seqdiag.as_slice()),
            (DiagramKind::Activity, self.actdiag.as_slice()),
            (DiagramKind::Network, self.nwdiag.as_slice()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.render, RenderConfig::default());
        for (kind, command) in config.render.commands() {
            assert_eq!(command, [kind.keyword().to_string()]);
        }
    }

    #[test]
    fn test_custom_commands() {
        let config = test_parse_config(
            "[render]\nseqdiag = [\"python3\", \"-m\", \"seqdiag.command\"]\nfont = \"/fonts/a.ttf\"\nantialias = true",
        );

        assert_eq!(
            config.render.seqdiag,
            ["python3", "-m", "seqdiag.command"]
        );
        assert_eq!(config.render.blockdiag, ["blockdiag"]);
        assert_eq!(config.render.font, Some(PathBuf::from("/fonts/a.ttf")));
        assert!(config.render.antialias);
    }
}
