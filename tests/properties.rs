mod support;

use proptest::prelude::*;

use pithgen::{ generate, GenConfig };
use support::hint_strategy::arb_hint;

fn no_placeholder_tokens(code : &str) -> bool {
    !code.contains("@pith_placeholder")
}

proptest! {
    /// Placeholder completeness: the returned code contains zero placeholder
    /// tokens -- every one minted during the BFS was substituted away.
    #[test]
    fn placeholder_completeness(hint in arb_hint()) {
        let result = generate(&hint, &GenConfig::default());
        if let Ok(generated) = result {
            prop_assert!(no_placeholder_tokens(&generated.code));
        }
    }

    /// Idempotence / determinism: repeated `generate` calls on the same
    /// hint return byte-identical code and equal auxiliary scopes.
    #[test]
    fn idempotent_generation(hint in arb_hint()) {
        let config = GenConfig::default();
        let first = generate(&hint, &config);
        let second = generate(&hint, &config);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.code, b.code);
                prop_assert_eq!(a.aux_scope, b.aux_scope);
                prop_assert_eq!(a.forward_ref_basenames, b.forward_ref_basenames);
            }
            (Err(_), Err(_)) => (),
            _ => prop_assert!(false, "one call succeeded and the other failed for the same hint"),
        }
    }

    /// Memoization correctness: structurally equal hints (by the classifier's
    /// own equality, i.e. `Hint`'s `PartialEq`) produce equal generated code.
    #[test]
    fn memoization_correctness_on_equal_hints(hint in arb_hint()) {
        let config = GenConfig::default();
        let cloned = hint.clone();
        prop_assert_eq!(&hint, &cloned);
        let a = generate(&hint, &config);
        let b = generate(&cloned, &config);
        prop_assert_eq!(a.is_ok(), b.is_ok());
        if let (Ok(a), Ok(b)) = (a, b) {
            prop_assert_eq!(a.code, b.code);
        }
    }

    /// Scope closure: every auxiliary-bound name that appears in the code
    /// really was inserted into `aux_scope` (the converse of "every key is
    /// used" isn't required -- a validator or child might bind a name the
    /// surrounding expression doesn't end up referencing on every path).
    #[test]
    fn scope_closure(hint in arb_hint()) {
        if let Ok(generated) = generate(&hint, &GenConfig::default()) {
            for name in generated.aux_scope.keys() {
                prop_assert!(
                    generated.code.contains(name.as_str()) || generated.forward_ref_basenames.iter().any(|b| b == name),
                    "aux_scope key {:?} never referenced in code", name,
                );
            }
        }
    }

    /// Forward-ref accounting: an absolute (dotted) forward reference never
    /// appears in `forward_ref_basenames`, which holds only relative
    /// basenames.
    #[test]
    fn forward_ref_basenames_are_never_dotted(hint in arb_hint()) {
        if let Ok(generated) = generate(&hint, &GenConfig::default()) {
            for name in &generated.forward_ref_basenames {
                prop_assert!(!name.contains('.'));
            }
        }
    }

    /// Random-bits binding: the bits-function key appears in `aux_scope`
    /// iff the code contains the random-index substring this crate always
    /// binds it under.
    #[test]
    fn random_bits_binding_matches_usage(hint in arb_hint()) {
        if let Ok(generated) = generate(&hint, &GenConfig::default()) {
            let key_bound = generated.aux_scope.keys().any(|k| k == "get_random_index");
            let substring_present = generated.code.contains("get_random_index");
            prop_assert_eq!(key_bound, substring_present);
        }
    }
}

#[test]
fn fixed_tuple_length_guard() {
    use pithgen::{ mk_instance, mk_tuple_fixed, ClassRef };
    let hint = mk_tuple_fixed(vec![
        mk_instance(ClassRef::builtin("builtins.int")),
        mk_instance(ClassRef::builtin("builtins.str")),
        mk_instance(ClassRef::builtin("builtins.float")),
    ]);
    let generated = generate(&hint, &GenConfig::default()).unwrap();
    assert!(generated.code.contains("== 3"));
}

#[test]
fn ignorable_child_produces_no_attributable_check() {
    use pithgen::{ mk_instance, mk_instance_ignorable, mk_union, ClassRef };
    let ignorable = mk_instance_ignorable(ClassRef::builtin("builtins.object"));
    let hint = mk_union(vec![ignorable, mk_instance(ClassRef::builtin("builtins.int"))]);
    let generated = generate(&hint, &GenConfig::default()).unwrap();
    assert_eq!(generated.code.matches("isinstance").count(), 1);
}

#[test]
fn union_partition_has_one_nonpep_group_and_one_clause_per_pep_child() {
    use pithgen::{ mk_instance, mk_sequence, mk_union, ClassRef };
    let hint = mk_union(vec![
        mk_instance(ClassRef::builtin("builtins.int")),
        mk_instance(ClassRef::builtin("builtins.str")),
        mk_sequence(ClassRef::builtin("builtins.list"), mk_instance(ClassRef::builtin("builtins.bool"))),
    ]);
    let generated = generate(&hint, &GenConfig::default()).unwrap();
    assert_eq!(generated.code.matches(" or\n").count(), 1);
    assert_eq!(generated.code.matches("isinstance").count(), 3);
}
