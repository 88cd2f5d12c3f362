//! Diagram dialects and keyword sniffing.

use std::fmt;

/// One of the four supported DSL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Block,
    Sequence,
    Activity,
    Network,
}

impl DiagramKind {
    /// Sniffing order. The first keyword that prefixes the source wins.
    pub const ALL: [Self; 4] = [Self::Block, Self::Sequence, Self::Activity, Self::Network];

    /// Root keyword of the dialect, also its route segment (`/blockdiag/...`).
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Block => "blockdiag",
            Self::Sequence => "seqdiag",
            Self::Activity => "actdiag",
            Self::Network => "nwdiag",
        }
    }

    /// Short label used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Sequence => "sequence",
            Self::Activity => "activity",
            Self::Network => "network",
        }
    }

    /// Look up a kind by its route segment (exact, case-sensitive).
    pub fn from_route(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == segment)
    }

    /// Infer the kind from the leading keyword of `source`.
    ///
    /// Leading ASCII whitespace is ignored (space, `\t`, `\n`, `\r`, `\x0b`,
    /// `\x0c`); other Unicode spaces are not. This is a plain prefix test,
    /// so `blockdiagram {` still sniffs as [`DiagramKind::Block`].
    pub fn sniff(source: &str) -> Option<Self> {
        let head = source.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
        Self::ALL.into_iter().find(|k| head.starts_with(k.keyword()))
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_each_keyword() {
        assert_eq!(DiagramKind::sniff("blockdiag { A -> B; }"), Some(DiagramKind::Block));
        assert_eq!(DiagramKind::sniff("seqdiag { A -> B; }"), Some(DiagramKind::Sequence));
        assert_eq!(DiagramKind::sniff("actdiag { A -> B; }"), Some(DiagramKind::Activity));
        assert_eq!(DiagramKind::sniff("nwdiag { network { A; } }"), Some(DiagramKind::Network));
    }

    #[test]
    fn test_sniff_skips_leading_whitespace() {
        assert_eq!(DiagramKind::sniff("\n\t  seqdiag {}"), Some(DiagramKind::Sequence));
        assert_eq!(DiagramKind::sniff("\r\x0b\x0cactdiag {}"), Some(DiagramKind::Activity));
    }

    #[test]
    fn test_sniff_only_skips_ascii_whitespace() {
        assert_eq!(DiagramKind::sniff("\u{3000}blockdiag {}"), None);
        assert_eq!(DiagramKind::sniff("\u{a0}nwdiag {}"), None);
    }

    #[test]
    fn test_sniff_is_plain_prefix() {
        assert_eq!(DiagramKind::sniff("blockdiagram {}"), Some(DiagramKind::Block));
        assert_eq!(DiagramKind::sniff("nwdiag"), Some(DiagramKind::Network));
    }

    #[test]
    fn test_sniff_rejects_unknown() {
        assert_eq!(DiagramKind::sniff(""), None);
        assert_eq!(DiagramKind::sniff("graph { A -> B }"), None);
        assert_eq!(DiagramKind::sniff("diagram blockdiag {}"), None);
        // case-sensitive, like the DSL keywords themselves
        assert_eq!(DiagramKind::sniff("Blockdiag {}"), None);
    }

    #[test]
    fn test_from_route() {
        for kind in DiagramKind::ALL {
            assert_eq!(DiagramKind::from_route(kind.keyword()), Some(kind));
        }
        assert_eq!(DiagramKind::from_route("png"), None);
        assert_eq!(DiagramKind::from_route("BLOCKDIAG"), None);
    }
}
