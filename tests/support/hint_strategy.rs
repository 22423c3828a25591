use proptest::prelude::*;

use pithgen::{ mk_instance, mk_literal, mk_sequence, mk_tuple_fixed, mk_union, ClassRef, Hint, LiteralValue };

fn arb_class() -> impl Strategy<Value = ClassRef> {
    prop_oneof![
        Just(ClassRef::builtin("builtins.int")),
        Just(ClassRef::builtin("builtins.str")),
        Just(ClassRef::builtin("builtins.bool")),
        Just(ClassRef::builtin("builtins.list")),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Hint> {
    prop_oneof![
        arb_class().prop_map(mk_instance),
        prop::collection::vec(any::<i64>(), 1..4)
            .prop_map(|ns| mk_literal(ns.into_iter().map(LiteralValue::Int).collect())),
    ]
}

/// A bounded-depth `Hint` generator covering `Instance`, `Literal`,
/// `Union`, sized `Sequence`, and fixed `TupleFixed` shapes -- enough
/// structural variety to exercise the quantified properties in
/// `properties.rs` without the generator needing every sign family
/// representable (`Annotated`/`Generic`/`Subclass`/`ForwardRef` carry
/// collaborator-supplied data this strategy has no stand-in for, so they're
/// covered directly by `scenarios.rs` instead).
pub fn arb_hint() -> impl Strategy<Value = Hint> {
    arb_leaf().prop_recursive(3, 12, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(mk_union),
            (arb_class(), inner.clone()).prop_map(|(origin, elem)| mk_sequence(origin, elem)),
            prop::collection::vec(inner, 0..4).prop_map(mk_tuple_fixed),
        ]
    })
}
