//! Diagram renderers.
//!
//! The layout engines are external programs (`blockdiag`, `seqdiag`,
//! `actdiag`, `nwdiag`). [`CommandRenderer`] drives them through a scratch
//! directory:
//!
//! ```text
//! <tmp>/source.diag  --(blockdiag -T svg -o result.svg source.diag)-->  <tmp>/result.svg
//! ```

use std::{fs, path::PathBuf};

use anyhow::Context;

use super::{DiagramKind, GenerateError, OutputFormat, Payload, RenderError};
use crate::config::RenderConfig;
use crate::utils::exec::{Cmd, CmdError};

/// Status reported when a diagram tool rejects its input.
const REJECTED_STATUS: u16 = 400;

const SOURCE_FILE: &str = "source.diag";

/// Turns diagram source into image bytes.
///
/// Implementations may block; they are called from worker threads.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        kind: DiagramKind,
        format: OutputFormat,
        source: &str,
    ) -> Result<Vec<u8>, RenderError>;
}

/// Renderer backed by the blockdiag family of command-line tools.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    blockdiag: Vec<String>,
    seqdiag: Vec<String>,
    actdiag: Vec<String>,
    nwdiag: Vec<String>,
    font: Option<PathBuf>,
    antialias: bool,
}

impl CommandRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            blockdiag: config.blockdiag.clone(),
            seqdiag: config.seqdiag.clone(),
            actdiag: config.actdiag.clone(),
            nwdiag: config.nwdiag.clone(),
            font: config.font.clone(),
            antialias: config.antialias,
        }
    }

    /// Command (program plus leading arguments) for `kind`.
    fn command(&self, kind: DiagramKind) -> &[String] {
        match kind {
            DiagramKind::Block => &self.blockdiag,
            DiagramKind::Sequence => &self.seqdiag,
            DiagramKind::Activity => &self.actdiag,
            DiagramKind::Network => &self.nwdiag,
        }
    }

    /// Tool arguments after the command, relative to the scratch directory.
    fn tool_args(&self, format: OutputFormat, output: &str) -> Vec<String> {
        let mut args = vec!["-T".to_string(), format.extension().to_string()];
        if self.antialias {
            args.push("-a".to_string());
        }
        if let Some(font) = &self.font {
            args.push("-f".to_string());
            args.push(font.display().to_string());
        }
        args.extend(["-o".to_string(), output.to_string(), SOURCE_FILE.to_string()]);
        args
    }
}

impl Renderer for CommandRenderer {
    fn render(
        &self,
        kind: DiagramKind,
        format: OutputFormat,
        source: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
        fs::write(scratch.path().join(SOURCE_FILE), source)
            .context("Failed to write diagram source")?;

        let output = format!("result.{}", format.extension());
        let run = Cmd::from_slice(self.command(kind))
            .args(self.tool_args(format, &output))
            .cwd(scratch.path())
            .run();

        match run {
            Ok(_) => {}
            Err(CmdError::Failed { stderr, stdout, .. }) => {
                let mut payload = Payload::new();
                payload.insert("diagram".to_string(), kind.keyword().into());
                return Err(GenerateError::new(diagnostic(&stderr, &stdout))
                    .with_status(REJECTED_STATUS)
                    .with_payload(payload)
                    .into());
            }
            Err(e @ CmdError::Spawn { .. }) => return Err(anyhow::Error::new(e).into()),
        }

        let path = scratch.path().join(&output);
        let bytes = fs::read(&path)
            .with_context(|| format!("{} produced no output", kind.keyword()))?;
        if bytes.is_empty() {
            return Err(anyhow::anyhow!("{} produced an empty {format}", kind.keyword()).into());
        }
        Ok(bytes)
    }
}

/// Extract the tool's error text, dropping its `ERROR: ` line prefixes.
fn diagnostic(stderr: &str, stdout: &str) -> String {
    let text = if stderr.trim().is_empty() { stdout } else { stderr };
    let lines: Vec<_> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix("ERROR:").map_or(line, str::trim_start))
        .collect();

    if lines.is_empty() {
        "diagram rendering failed".to_string()
    } else {
        lines.join("\n")
    }
}
