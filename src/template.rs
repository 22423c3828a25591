//! Named code templates (spec.md §4.A). Each function here takes the slots
//! a handler in `handlers` has already resolved (a pith expression, a bound
//! name, an indentation string, a child placeholder) and returns an owned
//! `String` built with `format!` -- no function in this module inspects a
//! `Hint` or consults `classifier`; that separation is the whole point of
//! having a template registry distinct from the handlers that drive it.

/// Wraps the whole generated boolean expression so a failed check short
/// circuits the wrapper function rather than raising inline.
pub fn root_prefix() -> &'static str {
    "(\n"
}

pub fn root_suffix() -> &'static str {
    "\n)"
}

/// Variant of [`root_suffix`] used when the root pith is bound via
/// `random.getrandbits`-style deferred evaluation (spec.md §4.G "Random
/// int passthrough"): the trailing paren closes an extra wrapping call.
pub fn root_suffix_with_random_int(getrandbits_arg_name : &str) -> String {
    format!("\n) if True else True for {arg} in (0,))", arg = getrandbits_arg_name)
}

/// A bare `isinstance` check against a hint's origin class. Used for both
/// `Instance` and as the tail of several compound handlers.
pub fn instance(indent : &str, obj : &str, cls_name : &str) -> String {
    format!("{indent}isinstance({obj}, {cls_name})")
}

pub mod union {
    pub fn prefix(indent : &str) -> String {
        format!("{indent}(")
    }

    /// One disjunct testing membership in a PEP-compliant child, realized
    /// as the child's own placeholder (substituted later by `generator`).
    pub fn child_pep(indent : &str, placeholder : &str) -> String {
        format!("{indent}{placeholder}")
    }

    /// One disjunct testing membership against the pre-bound tuple of this
    /// union's non-PEP-compliant (plain-class) children in one shot.
    pub fn child_nonpep(indent : &str, obj : &str, classes_binding : &str) -> String {
        format!("{indent}isinstance({obj}, {classes_binding})")
    }

    pub fn suffix(indent : &str) -> String {
        format!("{indent})")
    }
}

pub mod sequence {
    /// `isinstance(obj, origin) and (not obj or <child on a sampled elem>)`.
    /// The child placeholder stands for the per-element check; `generator`
    /// substitutes it with the dequeued element hint's own code, whose pith
    /// expression is the randomly-sampled element bound by the caller.
    pub fn args1(indent : &str, obj : &str, origin_binding : &str, child_placeholder : &str) -> String {
        format!(
            "{indent}(isinstance({obj}, {origin_binding}) and (not {obj} or {child}))",
            indent = indent, obj = obj, origin_binding = origin_binding, child = child_placeholder,
        )
    }
}

pub mod tuple {
    pub fn prefix(indent : &str, obj : &str) -> String {
        format!("{indent}(isinstance({obj}, tuple) and len({obj}) == ")
    }

    pub fn len(count : usize) -> String {
        format!("{count} and (")
    }

    /// One conjunct checking the element at a fixed index, via that
    /// element's own placeholder.
    pub fn child(indent : &str, placeholder : &str) -> String {
        format!("{indent}{placeholder}")
    }

    pub fn empty(indent : &str, obj : &str) -> String {
        format!("{indent}(isinstance({obj}, tuple) and len({obj}) == 0)")
    }

    pub fn suffix(indent : &str) -> String {
        format!("{indent}))")
    }
}

pub mod annotated {
    pub fn prefix(indent : &str) -> String {
        format!("{indent}(")
    }

    /// A single validator's filled-in template, already rendered by
    /// `handlers::annotated` from `Validator::code_template`; this just
    /// wires the ` and ` conjunction between it and the metahint check.
    pub fn child(indent : &str, metahint_placeholder : &str, validator_code : &str) -> String {
        format!("{indent}({metahint_placeholder} and\n{indent}{validator_code})")
    }

    pub fn suffix(indent : &str) -> String {
        format!("{indent})")
    }
}

pub mod subclass {
    pub fn check(indent : &str, obj : &str, target_binding : &str) -> String {
        format!("{indent}(isinstance({obj}, type) and issubclass({obj}, {target_binding}))")
    }
}

pub mod generic {
    pub fn prefix(indent : &str, obj : &str, origin_binding : &str) -> String {
        format!("{indent}(isinstance({obj}, {origin_binding}) and (\n")
    }

    /// One conjunct checking an unerased base, via that base's placeholder.
    pub fn child(indent : &str, placeholder : &str) -> String {
        format!("{indent}{placeholder}")
    }

    pub fn suffix(indent : &str) -> String {
        format!("{indent}))")
    }
}

pub mod literal {
    pub fn prefix(indent : &str, obj : &str, origin_binding : &str) -> String {
        format!("{indent}(isinstance({obj}, {origin_binding}) and {obj} in (")
    }

    pub fn child(value_binding : &str) -> String {
        format!("{value_binding}, ")
    }

    pub fn suffix(indent : &str) -> String {
        format!("{indent}))")
    }
}

pub mod forward_ref {
    pub fn check(indent : &str, obj : &str, resolved_binding : &str) -> String {
        format!("{indent}isinstance({obj}, {resolved_binding})")
    }
}

#[cfg(test)]
mod template_tests {
    use super::*;

    #[test]
    fn instance_template_fills_all_slots() {
        let code = instance("    ", "pith_0", "cls_0");
        assert_eq!(code, "    isinstance(pith_0, cls_0)");
    }

    #[test]
    fn union_prefix_and_suffix_balance() {
        let p = union::prefix("");
        let s = union::suffix("");
        assert_eq!(p, "(");
        assert_eq!(s, ")");
    }

    #[test]
    fn tuple_empty_is_self_contained() {
        let code = tuple::empty("", "pith_0");
        assert_eq!(code, "(isinstance(pith_0, tuple) and len(pith_0) == 0)");
    }
}
