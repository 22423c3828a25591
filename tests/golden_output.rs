//! Exact-text comparisons for the handful of hints whose generated code is
//! small and fully deterministic enough to pin down byte-for-byte. Most of
//! the suite (`scenarios.rs`, `properties.rs`) asserts on structural
//! substrings instead, since template text is an implementation detail --
//! these few golden cases exist because a multi-line diff is the clearest
//! way to catch an accidental template/indentation regression.

use pretty_assertions::assert_eq;

use pithgen::{ generate, mk_instance, mk_tuple_fixed, ClassRef, GenConfig };

#[test]
fn plain_class_golden_text() {
    let hint = mk_instance(ClassRef::builtin("builtins.int"));
    let generated = generate(&hint, &GenConfig::default()).unwrap();

    assert_eq!(generated.code, "(\n    isinstance(pith_root, cls_0)\n)");
    assert_eq!(generated.aux_scope.len(), 1);
    assert_eq!(generated.aux_scope.get_index(0).unwrap().0.as_str(), "cls_0");
}

/// Empty fixed tuple `Tuple[()]`: no elements to recurse into, so this is
/// the other fully pinned-down shape -- no pith capture, no bound classes
/// beyond none at all, one self-contained clause.
#[test]
fn empty_fixed_tuple_golden_text() {
    let hint = mk_tuple_fixed(Vec::new());
    let generated = generate(&hint, &GenConfig::default()).unwrap();

    assert_eq!(generated.code, "(\n    (isinstance(pith_root, tuple) and len(pith_root) == 0)\n)");
    assert!(generated.aux_scope.is_empty());
}
