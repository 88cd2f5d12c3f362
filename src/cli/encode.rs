//! `encode` command: turn a diagram source into a request path.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use crate::diagram::{self, DiagramKind, OutputFormat};

/// Encode `file` (stdin when `None` or `-`) and print the segment and path.
pub fn run(file: Option<&Path>, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let source = read_source(file)?;
    let encoded = diagram::encode(&source).context("failed to compress diagram source")?;

    if DiagramKind::sniff(&source).is_none() {
        crate::log!(
            "warning";
            "source does not start with a diagram keyword, the server will reject it"
        );
    }

    println!("{encoded}");
    println!("{}", suggested_path(&source, format, &encoded));
    Ok(())
}

/// Request path for an encoded source. Uses the explicit route when the kind
/// can be sniffed.
pub fn suggested_path(source: &str, format: OutputFormat, encoded: &str) -> String {
    match DiagramKind::sniff(source) {
        Some(kind) => format!("/{}/{format}/{encoded}", kind.keyword()),
        None => format!("/{format}/{encoded}"),
    }
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_path_sniffed() {
        let path = suggested_path("  seqdiag { a -> b }", OutputFormat::PNG, "eJx");
        assert_eq!(path, "/seqdiag/png/eJx");
    }

    #[test]
    fn test_suggested_path_unknown_kind() {
        let path = suggested_path("graph { }", OutputFormat::SVG, "eJx");
        assert_eq!(path, "/svg/eJx");
    }

    #[test]
    fn test_read_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.diag");
        fs::write(&path, "blockdiag { a -> b }").unwrap();

        assert_eq!(read_source(Some(&path)).unwrap(), "blockdiag { a -> b }");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Some(Path::new("/nonexistent/a.diag"))).unwrap_err();
        assert!(err.to_string().contains("a.diag"));
    }

    #[test]
    fn test_run_rejects_bad_format() {
        let err = run(Some(Path::new("/nonexistent/a.diag")), "gif").unwrap_err();
        assert!(err.to_string().contains("gif"));
    }

    #[test]
    fn test_run_writes_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.diag");
        fs::write(&path, "nwdiag { network { a; } }").unwrap();

        assert!(run(Some(&path), "pdf").is_ok());
    }
}
