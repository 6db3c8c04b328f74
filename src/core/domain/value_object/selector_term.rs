use std::fmt;

/// Syntactic class of a selector term, with the operand already extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    /// `all` or `@all`
    All,
    /// `all-<node>`, `@all-<node>` or `@node-<node>`
    AllOnNode(String),
    /// `@pool-<pool>`
    Pool(String),
    /// `@tag-<tag>`
    Tag(String),
    /// A vmid, a `min:max` range, or a name pattern with optional `%` wildcards
    IdOrNameOrRange(String),
}

/// One comma-separated unit of a selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorTerm {
    raw: String,
    excluded: bool,
    kind: TermKind,
}

impl SelectorTerm {
    /// Classifies one piece of a selector string.
    ///
    /// Returns `None` for empty pieces (`101,,102`) and for a bare `-`.
    #[must_use]
    pub fn parse(piece: &str) -> Option<Self> {
        let raw = piece.trim();
        let (excluded, body) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        if body.is_empty() {
            return None;
        }

        Some(Self {
            raw: raw.to_string(),
            excluded,
            kind: classify(body),
        })
    }

    /// The term as written, including any `-` prefix.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    #[must_use]
    pub fn kind(&self) -> &TermKind {
        &self.kind
    }
}

impl fmt::Display for SelectorTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn classify(body: &str) -> TermKind {
    if body == "all" || body == "@all" {
        return TermKind::All;
    }

    let on_node = ["@all-", "all-", "@node-"]
        .iter()
        .find_map(|prefix| body.strip_prefix(prefix));
    if let Some(node) = on_node {
        return TermKind::AllOnNode(node.to_string());
    }
    if let Some(pool) = body.strip_prefix("@pool-") {
        return TermKind::Pool(pool.to_string());
    }
    if let Some(tag) = body.strip_prefix("@tag-") {
        return TermKind::Tag(tag.to_string());
    }

    TermKind::IdOrNameOrRange(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_precedence() {
        let cases = vec![
            ("all", TermKind::All),
            ("@all", TermKind::All),
            ("all-pve1", TermKind::AllOnNode("pve1".to_string())),
            ("@all-pve1", TermKind::AllOnNode("pve1".to_string())),
            ("@node-pve1", TermKind::AllOnNode("pve1".to_string())),
            ("@pool-prod", TermKind::Pool("prod".to_string())),
            ("@tag-web", TermKind::Tag("web".to_string())),
            ("101", TermKind::IdOrNameOrRange("101".to_string())),
            ("100:200", TermKind::IdOrNameOrRange("100:200".to_string())),
            ("%web%", TermKind::IdOrNameOrRange("%web%".to_string())),
            ("allan", TermKind::IdOrNameOrRange("allan".to_string())),
        ];

        for (input, expected) in cases {
            let term = SelectorTerm::parse(input).unwrap();
            assert_eq!(term.kind(), &expected, "Term '{}' misclassified", input);
            assert!(!term.is_excluded());
        }
    }

    #[test]
    fn test_excluded_prefix_is_stripped() {
        let term = SelectorTerm::parse(" -@tag-test ").unwrap();
        assert!(term.is_excluded());
        assert_eq!(term.raw(), "-@tag-test");
        assert_eq!(term.kind(), &TermKind::Tag("test".to_string()));
    }

    #[test]
    fn test_empty_pieces_are_skipped() {
        assert_eq!(SelectorTerm::parse(""), None);
        assert_eq!(SelectorTerm::parse("  "), None);
        assert_eq!(SelectorTerm::parse("-"), None);
    }
}
