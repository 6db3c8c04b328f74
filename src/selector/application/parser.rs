//! Jolly selector expressions.
//!
//! A selector is a comma-separated list of terms such as `@node-pve1,-101,@tag-prod`.
//! Positive terms are unioned, then every `-` prefixed term is subtracted.
//!
//! Resolution is best-effort: a term that is malformed (`abc:10`), names an unknown
//! pool, or matches nothing contributes the empty set and the remaining terms still
//! apply. Only the collaborator fetching the snapshot can fail a resolution.

use super::{matcher, snapshot::InventorySnapshot};
use crate::core::domain::{
    model::resource_record::VmRecord,
    value_object::{SelectorTerm, TermKind},
};
use std::collections::HashSet;

/// A parsed selector: an ordered list of classified terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    terms: Vec<SelectorTerm>,
}

impl Selector {
    /// Splits and classifies a selector string. Never fails; empty pieces are dropped.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        Self {
            terms: selector.split(',').filter_map(SelectorTerm::parse).collect(),
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[SelectorTerm] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Pool names referenced by `@pool-` terms, in order of first appearance.
    pub fn pool_names(&self) -> Vec<&str> {
        self.operands(|kind| match kind {
            TermKind::Pool(pool) => Some(pool.as_str()),
            _ => None,
        })
    }

    /// Tags referenced by `@tag-` terms, in order of first appearance.
    pub fn tag_names(&self) -> Vec<&str> {
        self.operands(|kind| match kind {
            TermKind::Tag(tag) => Some(tag.as_str()),
            _ => None,
        })
    }

    fn operands<'a>(&'a self, pick: impl Fn(&'a TermKind) -> Option<&'a str>) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.terms
            .iter()
            .filter_map(|term| pick(term.kind()))
            .filter(|operand| seen.insert(*operand))
            .collect()
    }

    /// Evaluates the selector against a snapshot.
    ///
    /// The result is deduplicated by vmid and keeps the order in which guests were
    /// first selected.
    #[must_use]
    pub fn resolve(&self, snapshot: &InventorySnapshot) -> Vec<VmRecord> {
        let mut selected: Vec<&VmRecord> = Vec::new();
        let mut seen = HashSet::new();
        for term in self.terms.iter().filter(|t| !t.is_excluded()) {
            let matched = evaluate_term(term, snapshot);
            selected.extend(matched.into_iter().filter(|vm| seen.insert(vm.vmid)));
        }

        let excluded: HashSet<u32> = self
            .terms
            .iter()
            .filter(|t| t.is_excluded())
            .flat_map(|term| evaluate_term(term, snapshot))
            .map(|vm| vm.vmid)
            .collect();

        selected
            .into_iter()
            .filter(|vm| !excluded.contains(&vm.vmid))
            .cloned()
            .collect()
    }
}

fn evaluate_term<'a>(term: &SelectorTerm, snapshot: &'a InventorySnapshot) -> Vec<&'a VmRecord> {
    let matched = matcher::evaluate(term.kind(), snapshot);
    if matched.is_empty() {
        tracing::debug!(term = %term, "Selector term matched no guests");
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order_and_drops_empty_pieces() {
        let selector = Selector::parse("@node-pve1,,-101, @tag-prod,");
        let raw: Vec<&str> = selector.terms().iter().map(SelectorTerm::raw).collect();
        assert_eq!(raw, vec!["@node-pve1", "-101", "@tag-prod"]);
    }

    #[test]
    fn test_empty_selector() {
        assert!(Selector::parse("").is_empty());
        assert!(Selector::parse(" , ,").is_empty());
    }

    #[test]
    fn test_operand_lists_are_deduplicated() {
        let selector = Selector::parse("@pool-a,@tag-x,-@pool-b,@pool-a,@tag-x");
        assert_eq!(selector.pool_names(), vec!["a", "b"]);
        assert_eq!(selector.tag_names(), vec!["x"]);
    }
}
