//! Greedy matching of source field names against a curated alias pool.
//!
//! Each field is resolved in input order by the first rule that applies:
//!
//! 1. **Exact**: the field's normalized form is present in the pool and has
//!    not been consumed by an earlier field.
//! 2. **Prefix**: the first unconsumed pool entry, in pool order, that starts
//!    with the normalized form.
//! 3. **Fallback**: the normalized form itself. Fallbacks never consume a
//!    pool entry, so two fields may fall back to the same name.
//!
//! Pool entries chosen by rules 1 and 2 are consumed for the rest of the call.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::transform::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Prefix,
    Fallback,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchKind::Exact => "exact",
            MatchKind::Prefix => "prefix",
            MatchKind::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasMatch {
    pub alias: String,
    pub kind: MatchKind,
}

/// Aligns `origin` against the `alias` pool, returning one alias per field.
///
/// `normalized[i]` must be the canonical form of `origin[i]`. Only the
/// normalized forms take part in matching; `origin` fixes the output length
/// and order.
pub fn align<O, N, A>(origin: &[O], normalized: &[N], alias: &[A]) -> Vec<String>
where
    O: AsRef<str>,
    N: AsRef<str>,
    A: AsRef<str>,
{
    align_detailed(origin, normalized, alias)
        .into_iter()
        .map(|assignment| assignment.alias)
        .collect()
}

/// Same assignments as [`align`], annotated with the rule that produced each.
pub fn align_detailed<O, N, A>(origin: &[O], normalized: &[N], alias: &[A]) -> Vec<AliasMatch>
where
    O: AsRef<str>,
    N: AsRef<str>,
    A: AsRef<str>,
{
    let mut used: HashSet<&str> = HashSet::new();
    origin
        .iter()
        .zip(normalized)
        .map(|(_, norm)| assign(norm.as_ref(), alias, &mut used))
        .collect()
}

/// Normalizes `origin` and aligns it against `alias` in one step.
pub fn align_fields<O, A>(origin: &[O], alias: &[A]) -> Vec<AliasMatch>
where
    O: AsRef<str>,
    A: AsRef<str>,
{
    let normalized = origin
        .iter()
        .map(|field| normalize(field.as_ref()))
        .collect::<Vec<_>>();
    align_detailed(origin, normalized.as_slice(), alias)
}

fn assign<'a, A>(norm: &str, alias: &'a [A], used: &mut HashSet<&'a str>) -> AliasMatch
where
    A: AsRef<str>,
{
    let exact = alias
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|candidate| *candidate == norm);
    if let Some(candidate) = exact.filter(|candidate| !used.contains(candidate)) {
        used.insert(candidate);
        return AliasMatch {
            alias: candidate.to_string(),
            kind: MatchKind::Exact,
        };
    }

    let prefixed = alias
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|candidate| candidate.starts_with(norm) && !used.contains(candidate));
    if let Some(candidate) = prefixed {
        used.insert(candidate);
        return AliasMatch {
            alias: candidate.to_string(),
            kind: MatchKind::Prefix,
        };
    }

    AliasMatch {
        alias: norm.to_string(),
        kind: MatchKind::Fallback,
    }
}
