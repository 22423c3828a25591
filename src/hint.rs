use std::hash::{ Hash, Hasher };
use std::sync::Arc;

use fxhash::hash64;

use crate::validator::Validator;

use InnerHint::*;

/// Identity of a class in the host language. Since this crate never touches
/// a live host-language object (spec.md §1 "Non-goals": no runtime value
/// observation, no import-system interaction), a class is just its qualified
/// name plus a synthetic identity disambiguating same-named classes defined
/// in different scopes (the host decorator is expected to mint these; see
/// `ClassRef::new`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
    pub qualified_name : String,
    id : u64,
}

impl ClassRef {
    pub fn new(qualified_name : impl Into<String>, id : u64) -> Self {
        ClassRef { qualified_name : qualified_name.into(), id }
    }

    /// Convenience constructor for well-known builtins, where the qualified
    /// name alone is a stable identity.
    pub fn builtin(qualified_name : impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let id = hash64(&qualified_name);
        ClassRef { qualified_name, id }
    }

    fn digest(&self) -> u64 {
        hash64(&(&self.qualified_name, self.id))
    }
}

/// A hashable, host-agnostic representation of a literal operand appearing
/// in a `Literal[...]` hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Int(i64),
    Str(String),
    Bool(bool),
    NoneVal,
}

impl LiteralValue {
    /// The class of the value this literal holds, used by the `Literal`
    /// handler's pre-filter `isinstance` check (spec.md §4.F).
    pub fn class(&self) -> ClassRef {
        match self {
            LiteralValue::Int(_) => ClassRef::builtin("builtins.int"),
            LiteralValue::Str(_) => ClassRef::builtin("builtins.str"),
            LiteralValue::Bool(_) => ClassRef::builtin("builtins.bool"),
            LiteralValue::NoneVal => ClassRef::builtin("builtins.NoneType"),
        }
    }

    fn digest(&self) -> u64 {
        match self {
            LiteralValue::Int(n) => hash64(&(0u8, n)),
            LiteralValue::Str(s) => hash64(&(1u8, s)),
            LiteralValue::Bool(b) => hash64(&(2u8, b)),
            LiteralValue::NoneVal => hash64(&3u8),
        }
    }
}

/// The target of a `Subclass` (`Type[...]`) hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubclassTarget {
    Class(ClassRef),
    Classes(Vec<ClassRef>),
    ForwardRef(String),
}

/// `Hint` is an `Arc` wrapper around `InnerHint`, giving hints the same
/// hash-consed, cheaply-cloned shape this crate's lineage uses for its own
/// term representation (see `expr::Expr`). Two `Hint`s compare equal iff
/// their `InnerHint`s are structurally equal; `Hash` is delegated to the
/// cached structural digest so hints are usable as `HashMap`/memoization
/// keys without rehashing the whole tree on every lookup (spec.md §9
/// "Memoization key").
#[derive(Clone)]
pub struct Hint(Arc<InnerHint>);

impl std::convert::AsRef<InnerHint> for Hint {
    fn as_ref(&self) -> &InnerHint {
        match self {
            Hint(x) => x.as_ref()
        }
    }
}

impl From<InnerHint> for Hint {
    fn from(x : InnerHint) -> Hint {
        Hint(Arc::new(x))
    }
}

impl PartialEq for Hint {
    fn eq(&self, other : &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}
impl Eq for Hint {}

impl Hash for Hint {
    fn hash<H : Hasher>(&self, state : &mut H) {
        self.get_digest().hash(state);
    }
}

impl std::fmt::Debug for Hint {
    fn fmt(&self, f : &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_ref(), f)
    }
}

impl Hint {
    pub fn get_digest(&self) -> u64 {
        self.as_ref().get_cache().digest
    }

    pub fn is_ignorable(&self) -> bool {
        self.as_ref().get_cache().is_ignorable
    }
}

/// Caches a hint's structural digest and whether it's ignorable (e.g. bare
/// `object`, `Any`, or an empty-bodied `Annotated`). Computed once at
/// construction time by each `mk_*` function below, the same way
/// `expr::ExprCache` is threaded through `expr::mk_app`/`mk_pi`/etc. --
/// composing a node's digest from its children's cached digests means
/// hashing a hint never requires walking its subtree.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct HintCache {
    digest : u64,
    is_ignorable : bool,
}

impl std::fmt::Debug for HintCache {
    fn fmt(&self, f : &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "")
    }
}

#[derive(Clone)]
pub enum InnerHint {
    Instance { cache : HintCache, class : ClassRef },
    ForwardRef { cache : HintCache, name : String },
    Union { cache : HintCache, children : Vec<Hint> },
    /// Covers both a sized sequence (`List[T]`, `Set[T]`, ...) and a
    /// variadic tuple `Tuple[T, ...]` -- spec.md §4.F handles both with the
    /// same `SequenceArgs1` handler.
    Sequence { cache : HintCache, origin : ClassRef, elem : Hint },
    /// A fixed-length tuple, including the empty tuple `Tuple[()]`.
    TupleFixed { cache : HintCache, elems : Vec<Hint> },
    Annotated { cache : HintCache, metahint : Hint, validators : Vec<Arc<dyn Validator>> },
    Subclass { cache : HintCache, target : SubclassTarget },
    Generic { cache : HintCache, origin : ClassRef, bases : Vec<Hint> },
    Literal { cache : HintCache, values : Vec<LiteralValue> },
}

impl InnerHint {
    pub fn get_cache(&self) -> HintCache {
        match self {
            | Instance { cache, .. }
            | ForwardRef { cache, .. }
            | Union { cache, .. }
            | Sequence { cache, .. }
            | TupleFixed { cache, .. }
            | Annotated { cache, .. }
            | Subclass { cache, .. }
            | Generic { cache, .. }
            | Literal { cache, .. } => *cache,
        }
    }
}

fn validators_eq(a : &[Arc<dyn Validator>], b : &[Arc<dyn Validator>]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.identity() == y.identity())
}

impl PartialEq for InnerHint {
    fn eq(&self, other : &Self) -> bool {
        match (self, other) {
            (Instance { class : c1, .. }, Instance { class : c2, .. }) => c1 == c2,
            (ForwardRef { name : n1, .. }, ForwardRef { name : n2, .. }) => n1 == n2,
            (Union { children : c1, .. }, Union { children : c2, .. }) => c1 == c2,
            (Sequence { origin : o1, elem : e1, .. }, Sequence { origin : o2, elem : e2, .. }) =>
                o1 == o2 && e1 == e2,
            (TupleFixed { elems : e1, .. }, TupleFixed { elems : e2, .. }) => e1 == e2,
            (Annotated { metahint : m1, validators : v1, .. }, Annotated { metahint : m2, validators : v2, .. }) =>
                m1 == m2 && validators_eq(v1, v2),
            (Subclass { target : t1, .. }, Subclass { target : t2, .. }) => t1 == t2,
            (Generic { origin : o1, bases : b1, .. }, Generic { origin : o2, bases : b2, .. }) =>
                o1 == o2 && b1 == b2,
            (Literal { values : v1, .. }, Literal { values : v2, .. }) => v1 == v2,
            _ => false,
        }
    }
}
impl Eq for InnerHint {}

impl std::fmt::Debug for InnerHint {
    fn fmt(&self, f : &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Instance { class, .. } => write!(f, "Instance({})", class.qualified_name),
            ForwardRef { name, .. } => write!(f, "ForwardRef({:?})", name),
            Union { children, .. } => write!(f, "Union({:?})", children),
            Sequence { origin, elem, .. } => write!(f, "Sequence({}[{:?}])", origin.qualified_name, elem),
            TupleFixed { elems, .. } => write!(f, "TupleFixed({:?})", elems),
            Annotated { metahint, validators, .. } => write!(f, "Annotated({:?}, {} validators)", metahint, validators.len()),
            Subclass { target, .. } => write!(f, "Subclass({:?})", target),
            Generic { origin, bases, .. } => write!(f, "Generic({}, {:?})", origin.qualified_name, bases),
            Literal { values, .. } => write!(f, "Literal({:?})", values),
        }
    }
}

// ..................{ CONSTRUCTORS                      }..................
// Each constructor computes its `HintCache` eagerly from its children's
// cached digests, mirroring `expr::mk_app`/`mk_pi`/etc.

pub fn mk_instance(class : ClassRef) -> Hint {
    let digest = hash64(&(0u8, class.digest()));
    Instance { cache : HintCache { digest, is_ignorable : false }, class }.into()
}

/// The host decorator treats `object` (and, by convention, `Any`) as
/// ignorable: every value satisfies it, so no code need be emitted.
pub fn mk_instance_ignorable(class : ClassRef) -> Hint {
    let digest = hash64(&(0u8, class.digest()));
    Instance { cache : HintCache { digest, is_ignorable : true }, class }.into()
}

pub fn mk_forward_ref(name : impl Into<String>) -> Hint {
    let name = name.into();
    let digest = hash64(&(1u8, &name));
    ForwardRef { cache : HintCache { digest, is_ignorable : false }, name }.into()
}

pub fn mk_union(children : Vec<Hint>) -> Hint {
    let digests : Vec<u64> = children.iter().map(Hint::get_digest).collect();
    let digest = hash64(&(2u8, &digests));
    Union { cache : HintCache { digest, is_ignorable : false }, children }.into()
}

pub fn mk_sequence(origin : ClassRef, elem : Hint) -> Hint {
    let digest = hash64(&(3u8, origin.digest(), elem.get_digest()));
    Sequence { cache : HintCache { digest, is_ignorable : false }, origin, elem }.into()
}

pub fn mk_tuple_fixed(elems : Vec<Hint>) -> Hint {
    let digests : Vec<u64> = elems.iter().map(Hint::get_digest).collect();
    let digest = hash64(&(4u8, &digests));
    TupleFixed { cache : HintCache { digest, is_ignorable : false }, elems }.into()
}

pub fn mk_annotated(metahint : Hint, validators : Vec<Arc<dyn Validator>>) -> Hint {
    let ids : Vec<u64> = validators.iter().map(|v| v.identity()).collect();
    let digest = hash64(&(5u8, metahint.get_digest(), &ids));
    Annotated { cache : HintCache { digest, is_ignorable : false }, metahint, validators }.into()
}

pub fn mk_subclass(target : SubclassTarget) -> Hint {
    let digest = match &target {
        SubclassTarget::Class(c) => hash64(&(6u8, 0u8, c.digest())),
        SubclassTarget::Classes(cs) => hash64(&(6u8, 1u8, cs.iter().map(ClassRef::digest).collect::<Vec<_>>())),
        SubclassTarget::ForwardRef(n) => hash64(&(6u8, 2u8, n)),
    };
    Subclass { cache : HintCache { digest, is_ignorable : false }, target }.into()
}

pub fn mk_generic(origin : ClassRef, bases : Vec<Hint>) -> Hint {
    let digests : Vec<u64> = bases.iter().map(Hint::get_digest).collect();
    let digest = hash64(&(7u8, origin.digest(), &digests));
    Generic { cache : HintCache { digest, is_ignorable : false }, origin, bases }.into()
}

pub fn mk_literal(values : Vec<LiteralValue>) -> Hint {
    let digests : Vec<u64> = values.iter().map(LiteralValue::digest).collect();
    let digest = hash64(&(8u8, &digests));
    Literal { cache : HintCache { digest, is_ignorable : false }, values }.into()
}

#[cfg(test)]
mod hint_tests {
    use super::*;

    #[test]
    fn equal_hints_have_equal_digests() {
        let h1 = mk_union(vec![mk_instance(ClassRef::builtin("builtins.int")), mk_instance(ClassRef::builtin("builtins.str"))]);
        let h2 = mk_union(vec![mk_instance(ClassRef::builtin("builtins.int")), mk_instance(ClassRef::builtin("builtins.str"))]);
        assert_eq!(h1, h2);
        assert_eq!(h1.get_digest(), h2.get_digest());
    }

    #[test]
    fn order_sensitive_union() {
        let h1 = mk_union(vec![mk_instance(ClassRef::builtin("builtins.int")), mk_instance(ClassRef::builtin("builtins.str"))]);
        let h2 = mk_union(vec![mk_instance(ClassRef::builtin("builtins.str")), mk_instance(ClassRef::builtin("builtins.int"))]);
        assert_ne!(h1, h2);
    }

    #[test]
    fn ignorable_instance_flagged() {
        let h = mk_instance_ignorable(ClassRef::builtin("builtins.object"));
        assert!(h.is_ignorable());
    }
}
