use once_cell::sync::Lazy;
use tracing::{ debug_span, trace, warn };

use crate::binder::Binder;
use crate::classifier;
use crate::config::GenConfig;
use crate::handlers::{ self, ChildEnqueue };
use crate::hint::Hint;
use crate::hint_errors::{ HintCodegenError, HintCodegenResult };
use crate::placeholder::{ self, Placeholder };
use crate::queue::{ HintMeta, HintQueuePool };

/// The root pith's bound name, conventionally supplied by the host
/// decorator's wrapper signature. Not itself minted by this crate -- every
/// generated expression is relative to this fixed starting point.
pub const VAR_NAME_PITH_ROOT : &str = "pith_root";

static QUEUE_POOL : Lazy<HintQueuePool> = Lazy::new(HintQueuePool::default);

/// Result of a single `generate` call (spec.md §6).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCode {
    pub code : String,
    pub aux_scope : crate::binder::AuxScope,
    pub forward_ref_basenames : Vec<String>,
}

/// Generates a self-contained boolean expression deciding whether
/// `VAR_NAME_PITH_ROOT` conforms to `hint`. Pure, non-blocking, and
/// memoization-transparent -- repeated calls with structurally equal hints
/// produce byte-identical output (spec.md §9 "Memoization key"); callers
/// wanting the cache should go through [`crate::memo::generate_memoized`]
/// instead.
pub fn generate(hint : &Hint, config : &GenConfig) -> HintCodegenResult<GeneratedCode> {
    let _span = debug_span!("generate", digest = hint.get_digest()).entered();

    if hint.is_ignorable() {
        return Ok(GeneratedCode {
            code : "True".to_string(),
            aux_scope : crate::binder::AuxScope::new(),
            forward_ref_basenames : Vec::new(),
        });
    }

    let mut pooled = QUEUE_POOL.acquire(config.queue_capacity);
    let mut binder = Binder::new();
    let mut fwdref_basenames = Vec::new();
    let mut pith_counter : usize = 0;

    let root_placeholder = placeholder::mint();
    pooled.queue.push_back(HintMeta {
        hint : hint.clone(),
        placeholder : root_placeholder.as_str().to_string(),
        pith_expr : VAR_NAME_PITH_ROOT.to_string(),
        pith_var_name : None,
        indent : crate::handlers::CODE_INDENT_1.to_string(),
        is_capture : false,
    });

    if pooled.queue.len() > pooled.capacity() {
        return Err(HintCodegenError::HintTooLarge { capacity : pooled.capacity() });
    }

    let mut accum = root_placeholder.as_str().to_string();
    let mut root_substituted = false;
    let mut first = true;

    while let Some(item) = pooled.queue.pop_front() {
        let item_hint = if first { item.hint.clone() } else { classifier::sanitize(&item.hint) };

        if item_hint.is_ignorable() {
            return Err(HintCodegenError::HintIgnorablePresent);
        }
        if classifier::is_unsupported(&item_hint) {
            return Err(HintCodegenError::HintUnsupported { detail : format!("{:?}", item_hint) });
        }
        let sign = classifier::sign_of(&item_hint);
        if classifier::is_sign_unsupported(sign) {
            return Err(HintCodegenError::SignUnsupported { sign });
        }
        if classifier::is_deprecated(&item_hint) {
            warn!(sign = %sign, "dequeued hint is deprecated");
        }
        trace!(sign = %sign, queue_depth = pooled.queue.len(), "dequeued hint");

        let output = handlers::dispatch(sign, &item, &mut binder, config, &mut fwdref_basenames)?;

        // Whichever consumer of this item's pith is evaluated first -- the
        // item's own emitted text, or one of its enqueued children -- is
        // the one that must carry the `(name := expr)` capture; every other
        // consumer just reads the already-bound `name` (spec.md §4.E "The
        // first template slot that uses the pith uses the capture form;
        // later slots use the bare name"). A child can be textually first
        // even though it hasn't been generated yet, since its placeholder
        // token already occupies that position in `output.code`.
        let (wrap_here, delegate_idx) = match (&item.is_capture, &item.pith_var_name) {
            (true, Some(name)) => capture_plan(&output.code, name, &output.children),
            _ => (false, None),
        };

        let item_code = if wrap_here {
            let name = item.pith_var_name.as_ref().expect("wrap_here implies pith_var_name");
            output.code.replacen(name.as_str(), &format!("({} := {})", name, item.pith_expr), 1)
        } else {
            output.code
        };

        let placeholder_str = Placeholder::from_raw(item.placeholder.clone());
        accum = placeholder::substitute_once(&accum, &placeholder_str, &item_code)?;
        if item.placeholder == root_placeholder.as_str() {
            root_substituted = true;
        }

        for (idx, child) in output.children.into_iter().enumerate() {
            if Some(idx) == delegate_idx {
                let name = item.pith_var_name.clone().expect("delegate_idx implies pith_var_name");
                pooled.queue.push_back(HintMeta {
                    hint : child.hint,
                    placeholder : child.placeholder.as_str().to_string(),
                    pith_expr : item.pith_expr.clone(),
                    pith_var_name : Some(name),
                    indent : child.indent,
                    is_capture : true,
                });
            } else {
                enqueue_child(&mut pooled.queue, &item, child, config, &mut pith_counter);
            }
        }

        if pooled.queue.len() > pooled.capacity() {
            return Err(HintCodegenError::HintTooLarge { capacity : pooled.capacity() });
        }

        first = false;
    }

    if !root_substituted {
        return Err(HintCodegenError::RootNotChecked);
    }

    let used_random_bits = config.bind_random_bits && binder_has_getrandbits(&binder);
    let wrapped = if used_random_bits {
        format!("{}{}{}", crate::template::root_prefix(), accum, crate::template::root_suffix_with_random_int("get_random_index"))
    } else {
        format!("{}{}{}", crate::template::root_prefix(), accum, crate::template::root_suffix())
    };

    Ok(GeneratedCode {
        code : wrapped,
        aux_scope : binder.into_scope(),
        forward_ref_basenames : fwdref_basenames,
    })
}

/// Decides who captures this item's pith: `wrap_here` if `name`'s own first
/// textual occurrence in `code` precedes every child's placeholder (or no
/// child exists), `delegate_idx` pointing at whichever child's placeholder
/// comes first otherwise. Exactly one of the two is active, matching
/// whichever consumer actually evaluates first.
fn capture_plan(code : &str, name : &str, children : &[ChildEnqueue]) -> (bool, Option<usize>) {
    let name_pos = code.find(name);
    let first_child = children.iter()
        .enumerate()
        .filter_map(|(idx, child)| code.find(child.placeholder.as_str()).map(|pos| (pos, idx)))
        .min_by_key(|&(pos, _)| pos);

    match (name_pos, first_child) {
        (Some(np), Some((cp, idx))) if cp < np => (false, Some(idx)),
        (Some(_), _) => (true, None),
        (None, Some((_, idx))) => (false, Some(idx)),
        (None, None) => (false, None),
    }
}

fn binder_has_getrandbits(binder : &Binder) -> bool {
    binder.scope_ref().values().any(|v| matches!(v, crate::binder::AuxValue::GetRandBits))
}

fn enqueue_child(
    queue : &mut std::collections::VecDeque<HintMeta>,
    parent : &HintMeta,
    child : ChildEnqueue,
    config : &GenConfig,
    pith_counter : &mut usize,
) {
    let is_derived = child.pith_expr != parent.pith_ref();
    let (pith_expr, pith_var_name, is_capture) = if config.capture_piths && is_derived {
        let name = format!("pith_{}", *pith_counter);
        *pith_counter += 1;
        (child.pith_expr, Some(name), true)
    } else {
        (child.pith_expr, None, false)
    };

    queue.push_back(HintMeta {
        hint : child.hint,
        placeholder : child.placeholder.as_str().to_string(),
        pith_expr,
        pith_var_name,
        indent : child.indent,
        is_capture,
    });
}

#[cfg(test)]
mod generator_tests {
    use super::*;
    use crate::hint::*;

    #[test]
    fn instance_hint_generates_isinstance_check() {
        let hint = mk_instance(ClassRef::builtin("builtins.int"));
        let result = generate(&hint, &GenConfig::default()).unwrap();
        assert!(result.code.contains("isinstance(pith_root,"));
    }

    #[test]
    fn ignorable_hint_generates_true() {
        let hint = mk_instance_ignorable(ClassRef::builtin("builtins.object"));
        let result = generate(&hint, &GenConfig::default()).unwrap();
        assert_eq!(result.code, "True");
    }

    #[test]
    fn union_hint_enqueues_all_pep_children() {
        let hint = mk_union(vec![
            mk_instance(ClassRef::builtin("builtins.int")),
            mk_sequence(ClassRef::builtin("builtins.list"), mk_instance(ClassRef::builtin("builtins.str"))),
        ]);
        let result = generate(&hint, &GenConfig::default()).unwrap();
        assert!(result.code.contains("isinstance(pith_root,"));
        assert!(result.code.contains("isinstance"));
    }

    #[test]
    fn forward_ref_adds_basename() {
        let hint = mk_forward_ref("SomeClass");
        let result = generate(&hint, &GenConfig::default()).unwrap();
        assert_eq!(result.forward_ref_basenames, vec!["SomeClass".to_string()]);
    }

    /// A nested `Annotated` (its pith is a derived, capturing expression)
    /// must delegate the capture to its metahint child rather than to its
    /// own validator text, since the metahint's placeholder is positioned
    /// -- and therefore evaluated -- before the validators. Asserts the
    /// bound name's very first appearance in the generated code is the
    /// walrus form, not a bare read of an as-yet-unbound name.
    #[test]
    fn nested_annotated_delegates_capture_to_metahint_child() {
        use crate::validator::{ ComparisonValidator, Validator };
        use crate::binder::AuxValue;
        use std::sync::Arc;

        let validator : Arc<dyn Validator> = Arc::new(ComparisonValidator::new(
            1, ">", "bound_zero", AuxValue::Literal(LiteralValue::Int(0)),
        ));
        let annotated = mk_annotated(mk_instance(ClassRef::builtin("builtins.int")), vec![validator]);
        let hint = mk_sequence(ClassRef::builtin("builtins.list"), annotated);

        let result = generate(&hint, &GenConfig::default()).unwrap();
        let walrus_pos = result.code.find(":=").expect("capture assignment must appear");
        let bare_read_pos = result.code.find("bound_zero").expect("validator clause must appear");
        assert!(walrus_pos < bare_read_pos, "capture must be bound before the validator reads it:\n{}", result.code);
    }

    /// A nested `Union` whose children are all PEP-compliant (no plain
    /// classes to fold into a direct `isinstance` clause) has no textual
    /// use of its own pith at all -- every reference goes through an
    /// enqueued child. The capture must delegate to the first such child
    /// instead of being silently dropped.
    #[test]
    fn nested_all_pep_union_delegates_capture_to_first_child() {
        let union = mk_union(vec![
            mk_sequence(ClassRef::builtin("builtins.list"), mk_instance(ClassRef::builtin("builtins.int"))),
            mk_sequence(ClassRef::builtin("builtins.set"), mk_instance(ClassRef::builtin("builtins.str"))),
        ]);
        let hint = mk_sequence(ClassRef::builtin("builtins.list"), union);

        let result = generate(&hint, &GenConfig::default()).unwrap();
        assert!(result.code.contains(":="), "capture must not be dropped:\n{}", result.code);
    }

    /// `queue_capacity` is a real bound, not a doc comment: a config that
    /// can't even hold the root item fails fast with `HintTooLarge` instead
    /// of letting the `VecDeque` grow past it (spec.md §9's "bound BFS by
    /// the work-queue capacity and fail... rather than spin").
    #[test]
    fn queue_capacity_zero_fails_fast_with_hint_too_large() {
        let hint = mk_instance(ClassRef::builtin("builtins.int"));
        let config = GenConfig { queue_capacity : 0, ..GenConfig::default() };
        let result = generate(&hint, &config);
        assert_eq!(result, Err(HintCodegenError::HintTooLarge { capacity : 0 }));
    }

    /// A hint whose children outnumber a small but non-zero capacity is
    /// caught once the first round of children is enqueued, not only at the
    /// root.
    #[test]
    fn queue_capacity_exceeded_by_children_fails_with_hint_too_large() {
        let hint = mk_union(vec![
            mk_instance(ClassRef::builtin("builtins.int")),
            mk_sequence(ClassRef::builtin("builtins.list"), mk_instance(ClassRef::builtin("builtins.str"))),
            mk_sequence(ClassRef::builtin("builtins.set"), mk_instance(ClassRef::builtin("builtins.float"))),
        ]);
        let config = GenConfig { queue_capacity : 1, ..GenConfig::default() };
        let result = generate(&hint, &config);
        assert_eq!(result, Err(HintCodegenError::HintTooLarge { capacity : 1 }));
    }
}
