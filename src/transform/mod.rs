//! Field-name reconciliation between source schemas and curated aliases.

pub mod align;
pub mod normalize;

pub use align::{AliasMatch, MatchKind, align, align_detailed, align_fields};
pub use normalize::normalize;
