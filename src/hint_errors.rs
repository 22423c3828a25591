use std::fmt::Debug;

use crate::sign::Sign;

/// Error taxonomy for the hint-to-code generator (spec.md §7). Every kind
/// listed there is a variant here, including the ones spec.md calls
/// "internal" -- since this crate is a library embedded in somebody else's
/// decorator, an internal invariant violation is still just a `Result::Err`
/// to the caller, never a `panic!` or `std::process::exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintCodegenError {
    /// A child appeared that is neither a classified hint nor a plain class.
    HintNonCompliant { detail : String },
    /// The classifier reported the hint itself as out of scope.
    HintUnsupported { detail : String },
    /// The classifier reported the hint's sign as out of scope.
    SignUnsupported { sign : Sign },
    /// An ignorable hint was dequeued; the enqueuing handler should have
    /// filtered it. Indicates a bug in a sign handler, not caller error.
    HintIgnorablePresent,
    /// An `Annotated` hint mixed validators with non-validator metadata at a
    /// non-first position. Unreachable through `handlers::annotated` in this
    /// crate's data model -- `Hint::Annotated`'s `validators` field is typed
    /// `Vec<Arc<dyn Validator>>`, so non-validator metadata can't be
    /// constructed there in the first place -- but kept as a named variant
    /// since a caller-supplied `Validator::required_bindings` or a future,
    /// more permissive `mk_annotated` could still need to report it.
    MixedAnnotatedMetadata,
    /// The BFS drained without emitting any check for the root hint.
    RootNotChecked,
    /// A forward-reference operand was not a syntactically valid dotted name.
    ForwardRefMalformed { name : String },
    /// Two auxiliary-scope insertions used the same bound name for unequal
    /// values.
    DuplicateName { name : String },
    /// The hint graph exceeded the pooled work queue's fixed capacity.
    HintTooLarge { capacity : usize },
    /// Dispatch reached the end of the sign `match` without a handler. Only
    /// reachable if `Sign` grows a variant `generator` forgot to wire up.
    InternalSignUnhandled { sign : Sign },
    /// A placeholder token's multiplicity in the accumulating code was not
    /// exactly one at substitution time.
    PlaceholderMultiplicity { placeholder : String, occurrences : usize },
}

pub type HintCodegenResult<T> = Result<T, HintCodegenError>;

impl std::fmt::Display for HintCodegenError {
    fn fmt(&self, f : &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HintCodegenError::HintNonCompliant { detail } =>
                write!(f, "hint is not PEP-compliant and not a plain class: {}", detail),
            HintCodegenError::HintUnsupported { detail } =>
                write!(f, "hint is unsupported by this code generator: {}", detail),
            HintCodegenError::SignUnsupported { sign } =>
                write!(f, "hint sign {:?} is unsupported by this code generator", sign),
            HintCodegenError::HintIgnorablePresent =>
                write!(f, "internal error: an ignorable hint was dequeued; the enqueuing handler should have filtered it"),
            HintCodegenError::MixedAnnotatedMetadata =>
                write!(f, "Annotated hint mixes validators with non-validator metadata at a non-first position"),
            HintCodegenError::RootNotChecked =>
                write!(f, "internal error: breadth-first search completed without emitting a check for the root hint"),
            HintCodegenError::ForwardRefMalformed { name } =>
                write!(f, "forward reference {:?} is not a syntactically valid dotted name", name),
            HintCodegenError::DuplicateName { name } =>
                write!(f, "internal error: auxiliary scope name {:?} was bound to two unequal values", name),
            HintCodegenError::HintTooLarge { capacity } =>
                write!(f, "hint graph exceeded the work-queue capacity of {} entries", capacity),
            HintCodegenError::InternalSignUnhandled { sign } =>
                write!(f, "internal error: sign {:?} reached dispatch with no matching handler", sign),
            HintCodegenError::PlaceholderMultiplicity { placeholder, occurrences } =>
                write!(f, "internal error: placeholder {:?} appeared {} times at substitution time, expected exactly 1", placeholder, occurrences),
        }
    }
}

impl std::error::Error for HintCodegenError {}
