use crate::binder::Binder;
use crate::classifier;
use crate::hint::InnerHint;
use crate::hint_errors::HintCodegenResult;
use crate::placeholder;
use crate::queue::HintMeta;
use crate::template;

use super::{ ChildEnqueue, HandlerOutput, CODE_INDENT_1 };

/// A fixed-length tuple `Tuple[T1, ..., Tn]`, including the empty tuple
/// (spec.md §4.F "Fixed-length tuple"). Emits a length check followed by
/// one conjunct per element, each enqueued against its own indexed pith.
pub fn handle(meta : &HintMeta, _binder : &mut Binder) -> HintCodegenResult<HandlerOutput> {
    if classifier::is_empty_fixed_tuple(&meta.hint) {
        let code = template::tuple::empty(&meta.indent, meta.pith_ref());
        return Ok(HandlerOutput::leaf(code));
    }

    let elems = match meta.hint.as_ref() {
        InnerHint::TupleFixed { elems, .. } => elems,
        _ => unreachable!("handlers::tuple dispatched a non-TupleFixed hint"),
    };

    let mut conjuncts = Vec::new();
    let mut enqueues = Vec::new();
    for (idx, elem) in elems.iter().enumerate() {
        if elem.is_ignorable() {
            continue;
        }
        let placeholder = placeholder::mint();
        conjuncts.push(template::tuple::child(CODE_INDENT_1, placeholder.as_str()));
        enqueues.push(ChildEnqueue {
            hint : elem.clone(),
            placeholder,
            pith_expr : format!("{}[{}]", meta.pith_ref(), idx),
            indent : format!("{}{}", meta.indent, CODE_INDENT_1),
        });
    }

    let mut code = String::new();
    code.push_str(&template::tuple::prefix(&meta.indent, meta.pith_ref()));
    code.push_str(&template::tuple::len(elems.len()));
    if conjuncts.is_empty() {
        code.push_str("True");
    } else {
        code.push('\n');
        code.push_str(&conjuncts.join(" and\n"));
        code.push('\n');
    }
    code.push_str(&template::tuple::suffix(&meta.indent));

    Ok(HandlerOutput { code, children : enqueues })
}
