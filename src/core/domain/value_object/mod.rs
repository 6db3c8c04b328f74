mod selector_term;
mod weekday;

pub use selector_term::{SelectorTerm, TermKind};
pub use weekday::Weekday;
