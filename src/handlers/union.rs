use crate::binder::Binder;
use crate::classifier;
use crate::hint::InnerHint;
use crate::hint_errors::{ HintCodegenError, HintCodegenResult };
use crate::placeholder;
use crate::queue::HintMeta;
use crate::sign::Sign;
use crate::template;

use super::{ ChildEnqueue, HandlerOutput, CODE_INDENT_1 };

/// `Union[...]`: partitions children into plain classes (folded into one
/// `isinstance(obj, (A, B, ...))` disjunct) and PEP-compliant children
/// (each enqueued with its own placeholder), per spec.md §4.F "Union".
/// Ignorable children are dropped entirely, since they'd make the whole
/// union trivially true and the enqueueing handler is responsible for
/// filtering them out before `generator` ever sees them dequeued
/// (`HintCodegenError::HintIgnorablePresent` guards the inverse mistake).
pub fn handle(meta : &HintMeta, binder : &mut Binder) -> HintCodegenResult<HandlerOutput> {
    let children = match meta.hint.as_ref() {
        InnerHint::Union { children, .. } => children,
        _ => unreachable!("handlers::union dispatched a non-Union hint"),
    };

    let mut plain_classes = Vec::new();
    let mut pep_children = Vec::new();
    for child in children {
        if child.is_ignorable() {
            continue;
        }
        match classifier::sign_of(child) {
            Sign::Instance => {
                let class = classifier::origin_class_of(child)
                    .expect("Instance hint always has an origin class");
                plain_classes.push(class);
            }
            _ => pep_children.push(child.clone()),
        }
    }

    let mut disjuncts = Vec::new();
    if !plain_classes.is_empty() {
        let classes_binding = binder.bind_types(plain_classes)?;
        disjuncts.push(template::union::child_nonpep(CODE_INDENT_1, meta.pith_ref(), &classes_binding));
    }

    let mut enqueues = Vec::new();
    for child in pep_children {
        let placeholder = placeholder::mint();
        disjuncts.push(template::union::child_pep(CODE_INDENT_1, placeholder.as_str()));
        enqueues.push(ChildEnqueue {
            hint : child,
            placeholder,
            pith_expr : meta.pith_ref().to_string(),
            indent : format!("{}{}", meta.indent, CODE_INDENT_1),
        });
    }

    if disjuncts.is_empty() {
        return Err(HintCodegenError::HintNonCompliant { detail : "Union with no non-ignorable children".to_string() });
    }

    let mut code = String::new();
    code.push_str(&template::union::prefix(&meta.indent));
    code.push('\n');
    code.push_str(&disjuncts.join(" or\n"));
    code.push('\n');
    code.push_str(&template::union::suffix(&meta.indent));

    Ok(HandlerOutput { code, children : enqueues })
}
