use crate::binder::Binder;
use crate::classifier;
use crate::hint_errors::HintCodegenResult;
use crate::placeholder;
use crate::queue::HintMeta;
use crate::template;

use super::{ ChildEnqueue, HandlerOutput, CODE_INDENT_1 };

/// A user-defined generic class parameterized over one or more unerased
/// bases: an `isinstance` against the origin class, conjoined with one
/// check per base (spec.md §4.F "Generic/protocol"). Bases are enqueued
/// against the same pith as the generic itself -- a generic's bases
/// describe the same runtime object, not a nested container.
pub fn handle(meta : &HintMeta, binder : &mut Binder) -> HintCodegenResult<HandlerOutput> {
    let origin = classifier::origin_class_of(&meta.hint)
        .expect("Generic hint always has an origin class");
    let bases = classifier::generic_unerased_bases_of(&meta.hint);
    let origin_binding = binder.bind_type(origin)?;

    let mut conjuncts = Vec::new();
    let mut enqueues = Vec::new();
    let child_indent = format!("{}{}", meta.indent, CODE_INDENT_1);
    for base in bases {
        if base.is_ignorable() {
            continue;
        }
        let placeholder = placeholder::mint();
        conjuncts.push(template::generic::child(&child_indent, placeholder.as_str()));
        enqueues.push(ChildEnqueue {
            hint : base,
            placeholder,
            pith_expr : meta.pith_ref().to_string(),
            indent : child_indent.clone(),
        });
    }

    let mut code = template::generic::prefix(&meta.indent, meta.pith_ref(), &origin_binding);
    if conjuncts.is_empty() {
        code.push_str(&child_indent);
        code.push_str("True");
    } else {
        code.push_str(&conjuncts.join(" and\n"));
    }
    code.push('\n');
    code.push_str(&template::generic::suffix(&meta.indent));

    Ok(HandlerOutput { code, children : enqueues })
}
