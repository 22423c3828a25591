use crate::hint::{ ClassRef, Hint, InnerHint, LiteralValue, SubclassTarget };
use crate::sign::Sign;
use crate::validator::Validator;
use std::sync::Arc;

/// Maps a hint to its `Sign` (spec.md §4.C). Called only from `generator`
/// and `handlers::*`.
pub fn sign_of(hint : &Hint) -> Sign {
    match hint.as_ref() {
        InnerHint::Instance { .. } => Sign::Instance,
        InnerHint::ForwardRef { .. } => Sign::ForwardRef,
        InnerHint::Union { .. } => Sign::Union,
        InnerHint::Sequence { .. } => Sign::SequenceArgs1,
        InnerHint::TupleFixed { .. } => Sign::Tuple,
        InnerHint::Annotated { .. } => Sign::Annotated,
        InnerHint::Subclass { .. } => Sign::Subclass,
        InnerHint::Generic { .. } => Sign::Generic,
        InnerHint::Literal { .. } => Sign::Literal,
    }
}

/// The direct PEP-compliant children of a hint, in enqueue order. Plain
/// classes and forward references have none; `Annotated`'s only child is
/// its underlying metahint (validators are not children -- they are
/// consumed directly by `handlers::annotated`, never enqueued).
pub fn children_of(hint : &Hint) -> Vec<Hint> {
    match hint.as_ref() {
        InnerHint::Instance { .. } | InnerHint::ForwardRef { .. } | InnerHint::Literal { .. } => Vec::new(),
        InnerHint::Union { children, .. } => children.clone(),
        InnerHint::Sequence { elem, .. } => vec![elem.clone()],
        InnerHint::TupleFixed { elems, .. } => elems.clone(),
        InnerHint::Annotated { metahint, .. } => vec![metahint.clone()],
        InnerHint::Subclass { .. } => Vec::new(),
        InnerHint::Generic { bases, .. } => bases.clone(),
    }
}

/// The isinstanceable origin class of a hint, if it has one (spec.md
/// §3 "Origin class"). `Instance` is its own origin; `Sequence` and
/// `Generic` carry an explicit origin; everything else has none.
pub fn origin_class_of(hint : &Hint) -> Option<ClassRef> {
    match hint.as_ref() {
        InnerHint::Instance { class, .. } => Some(class.clone()),
        InnerHint::Sequence { origin, .. } => Some(origin.clone()),
        InnerHint::Generic { origin, .. } => Some(origin.clone()),
        _ => None,
    }
}

pub fn is_ignorable(hint : &Hint) -> bool {
    hint.is_ignorable()
}

/// This generator supports every `Sign`; a hint could still be rejected by
/// a more fine-grained check a caller layers on top (e.g. a depth bound),
/// but there is no hint shape `classifier` itself refuses as a matter of
/// principle. Kept as a named hook (returning `false` always) so
/// `generator`'s "reject unsupported hints" step (spec.md §4.E) has
/// somewhere real to call, matching the external contract described in
/// spec.md §4.C.
pub fn is_unsupported(_hint : &Hint) -> bool {
    false
}

/// Whether this sign is, as a blanket matter, out of scope. None are, for
/// the same reason as `is_unsupported` above; see that function's comment.
pub fn is_sign_unsupported(_sign : Sign) -> bool {
    false
}

/// Deprecated forms (e.g. a pre-PEP-585 builtin-generic alias) would be
/// flagged here; this generator's hint representation is already
/// canonicalized by its `mk_*` constructors (see `sanitize` below), so no
/// hint this crate can construct is itself deprecated.
pub fn is_deprecated(_hint : &Hint) -> bool {
    false
}

// spec.md §4.E step 4 describes a separate "is_shallow" computation (an
// unparameterized `Instance`, or a parameterized hint whose sign isn't dug
// into further) feeding a shallow/non-shallow dispatch split in step 5. This
// crate's `Sign` already draws that exact line: `Sign::Instance` is the only
// sign with no children to recurse into, so `sign_of` returning it and
// `handlers::dispatch` routing it to `handlers::instance` (generator.rs) is
// that same computation and branch, with no second predicate needed.

// ..................{ sign-specific projections         }..................

pub fn metahint_of(hint : &Hint) -> Option<Hint> {
    match hint.as_ref() {
        InnerHint::Annotated { metahint, .. } => Some(metahint.clone()),
        _ => None,
    }
}

pub fn validators_of(hint : &Hint) -> Vec<Arc<dyn Validator>> {
    match hint.as_ref() {
        InnerHint::Annotated { validators, .. } => validators.clone(),
        _ => Vec::new(),
    }
}

pub fn literal_values_of(hint : &Hint) -> Vec<LiteralValue> {
    match hint.as_ref() {
        InnerHint::Literal { values, .. } => values.clone(),
        _ => Vec::new(),
    }
}

pub fn generic_unerased_bases_of(hint : &Hint) -> Vec<Hint> {
    match hint.as_ref() {
        InnerHint::Generic { bases, .. } => bases.clone(),
        _ => Vec::new(),
    }
}

pub fn subclass_superclass_of(hint : &Hint) -> Option<SubclassTarget> {
    match hint.as_ref() {
        InnerHint::Subclass { target, .. } => Some(target.clone()),
        _ => None,
    }
}

pub fn sized_sequence_arg_of(hint : &Hint) -> Option<Hint> {
    match hint.as_ref() {
        InnerHint::Sequence { elem, .. } => Some(elem.clone()),
        _ => None,
    }
}

pub fn is_empty_fixed_tuple(hint : &Hint) -> bool {
    matches!(hint.as_ref(), InnerHint::TupleFixed { elems, .. } if elems.is_empty())
}

/// Reduces a non-root dequeued hint to its canonical form. Every `Hint` this
/// crate can construct is already canonical (its `mk_*` constructor *is*
/// the canonicalization step), so `sanitize` is the identity; it exists as
/// a named seam so a future host-specific canonicalization pass (e.g.
/// resolving a PEP 585 builtin alias to its generic form before this
/// generator ever sees it) has somewhere to plug in without touching
/// `generator` (spec.md §6 "Sanitizer").
pub fn sanitize(hint : &Hint) -> Hint {
    hint.clone()
}
