//! Evaluation of a single selector term against an inventory snapshot.
//!
//! Every comparison that tolerates operator case mistakes goes through [`fold_eq`].
//! Terms that are malformed or match nothing yield an empty list, never an error.

use super::snapshot::InventorySnapshot;
use crate::core::domain::{model::resource_record::VmRecord, value_object::TermKind};

/// Lowercases text for case-insensitive comparison.
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Matches either exactly or after case folding.
pub(crate) fn fold_eq(left: &str, right: &str) -> bool {
    left == right || fold(left) == fold(right)
}

/// Returns the guests selected by one term body.
pub(crate) fn evaluate<'a>(kind: &TermKind, snapshot: &'a InventorySnapshot) -> Vec<&'a VmRecord> {
    match kind {
        TermKind::All => snapshot.vms().collect(),
        TermKind::AllOnNode(node) => snapshot.vms().filter(|vm| fold_eq(&vm.node, node)).collect(),
        TermKind::Pool(pool) => match snapshot.find_pool(pool) {
            Some(canonical) => snapshot.pool_members(canonical).iter().collect(),
            None => {
                tracing::debug!(pool = %pool, "Unknown pool in selector");
                Vec::new()
            }
        },
        TermKind::Tag(tag) => snapshot
            .vms()
            .filter(|vm| vm.tags.iter().any(|t| fold_eq(t, tag)))
            .collect(),
        TermKind::IdOrNameOrRange(body) => match_id_name_or_range(body, snapshot),
    }
}

fn match_id_name_or_range<'a>(body: &str, snapshot: &'a InventorySnapshot) -> Vec<&'a VmRecord> {
    if body.contains(':') {
        return match parse_range(body) {
            Some((min, max)) => snapshot
                .vms()
                .filter(|vm| (min..=max).contains(&vm.vmid))
                .collect(),
            None => {
                tracing::debug!(term = %body, "Malformed vmid range in selector");
                Vec::new()
            }
        };
    }

    if let Some(vmid) = parse_vmid(body) {
        return snapshot.vms().filter(|vm| vm.vmid == vmid).collect();
    }

    match NamePattern::parse(body) {
        Some(pattern) => snapshot.vms().filter(|vm| pattern.matches(&vm.name)).collect(),
        None => {
            tracing::debug!(term = %body, "Unsupported wildcard position in selector");
            Vec::new()
        }
    }
}

/// Parses `min:max`. Reversed bounds are returned as-is and simply match nothing.
fn parse_range(body: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = body.split(':').collect();
    match parts.as_slice() {
        [min, max] => Some((parse_vmid(min)?, parse_vmid(max)?)),
        _ => None,
    }
}

fn parse_vmid(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// A guest name pattern: exact, or with a leading and/or trailing `%` wildcard.
#[derive(Debug, PartialEq, Eq)]
enum NamePattern {
    Exact(String),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
}

impl NamePattern {
    /// The ends decide the shape, then every `%` is stripped from the compare
    /// text. Returns `None` when `%` appears only inside the name.
    fn parse(body: &str) -> Option<Self> {
        if !body.contains('%') {
            return Some(Self::Exact(body.to_string()));
        }

        let leading = body.starts_with('%');
        let trailing = body.len() > 1 && body.ends_with('%');
        let text = fold(&body.replace('%', ""));
        Some(match (leading, trailing) {
            (true, true) => Self::Contains(text),
            (false, true) => Self::StartsWith(text),
            (true, false) => Self::EndsWith(text),
            (false, false) => return None,
        })
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => fold_eq(name, expected),
            Self::Contains(text) => fold(name).contains(text.as_str()),
            Self::StartsWith(text) => fold(name).starts_with(text.as_str()),
            Self::EndsWith(text) => fold(name).ends_with(text.as_str()),
        }
    }
}
