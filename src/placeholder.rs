use std::sync::atomic::{ AtomicU64, Ordering };

use crate::hint_errors::{ HintCodegenError, HintCodegenResult };

/// A textual token standing in for a not-yet-generated child's code, minted
/// once per enqueued hint and substituted exactly once when that child's
/// code is ready (spec.md §4.E "Placeholder substitution").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder(String);

impl Placeholder {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reconstructs a `Placeholder` from a token previously minted by
    /// [`mint`] and stored as a plain `String` (e.g. in `queue::HintMeta`,
    /// which can't hold a borrowed `Placeholder` across the BFS loop).
    pub fn from_raw(token : String) -> Self {
        Placeholder(token)
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f : &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_ID : AtomicU64 = AtomicU64::new(0);

const PREFIX : &str = "@pith_placeholder";
const SUFFIX : &str = "~@";

/// Mints a fresh placeholder, globally unique for the lifetime of the
/// process. Uniqueness across concurrent `generate` calls matters only in
/// that two placeholders must never collide within the same generated
/// string; a monotonic counter guarantees that cheaply without needing a
/// per-call namespace.
pub fn mint() -> Placeholder {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    Placeholder(format!("{}{}{}", PREFIX, id, SUFFIX))
}

/// Replaces the single occurrence of `placeholder` in `code` with
/// `replacement`. Errors if the placeholder appears zero or more than once
/// -- every placeholder this crate mints is consumed by exactly one
/// substitution (spec.md §4.E invariant "each placeholder is substituted
/// exactly once").
pub fn substitute_once(code : &str, placeholder : &Placeholder, replacement : &str) -> HintCodegenResult<String> {
    let needle = placeholder.as_str();
    let count = code.matches(needle).count();
    if count != 1 {
        return Err(HintCodegenError::PlaceholderMultiplicity { placeholder : needle.to_string(), occurrences : count });
    }
    Ok(code.replacen(needle, replacement, 1))
}

#[cfg(test)]
mod placeholder_tests {
    use super::*;

    #[test]
    fn mint_produces_distinct_tokens() {
        let a = mint();
        let b = mint();
        assert_ne!(a, b);
    }

    #[test]
    fn substitute_once_replaces_single_occurrence() {
        let p = mint();
        let code = format!("prefix {} suffix", p.as_str());
        let out = substitute_once(&code, &p, "REPLACED").unwrap();
        assert_eq!(out, "prefix REPLACED suffix");
    }

    #[test]
    fn substitute_zero_occurrences_errors() {
        let p = mint();
        let err = substitute_once("no placeholder here", &p, "x");
        assert!(matches!(err, Err(HintCodegenError::PlaceholderMultiplicity { occurrences : 0, .. })));
    }

    #[test]
    fn substitute_duplicate_occurrences_errors() {
        let p = mint();
        let code = format!("{} and {}", p.as_str(), p.as_str());
        let err = substitute_once(&code, &p, "x");
        assert!(matches!(err, Err(HintCodegenError::PlaceholderMultiplicity { occurrences : 2, .. })));
    }
}
