/// Closed enumeration of hint families (spec.md §3 "Sign"). Every `Hint`
/// maps to exactly one `Sign` via `classifier::sign_of`; signs are disjoint
/// and this is the tag `generator` dispatches on to pick a handler in
/// `handlers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// A plain, unparameterized class.
    Instance,
    /// A textual forward reference to a not-yet-defined class.
    ForwardRef,
    /// `Union[...]` of two or more children.
    Union,
    /// A sized sequence parameterized by exactly one element hint, or a
    /// variadic tuple `Tuple[T, ...]` (handled the same way).
    SequenceArgs1,
    /// A fixed-length tuple `Tuple[T1, ..., Tn]` (including the empty tuple
    /// `Tuple[()]`).
    Tuple,
    /// `Annotated[T, validators...]`.
    Annotated,
    /// `Type[T]` / `Type[Union[T1, T2]]` is-subclass-of.
    Subclass,
    /// A user-defined generic class parameterized over one or more bases.
    Generic,
    /// `Literal[...]` value-equality against a finite set.
    Literal,
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f : &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
