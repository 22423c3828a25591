use crate::binder::Binder;
use crate::classifier;
use crate::hint_errors::HintCodegenResult;
use crate::placeholder;
use crate::queue::HintMeta;
use crate::template;

use super::{ ChildEnqueue, HandlerOutput, CODE_INDENT_1 };

/// `Annotated[T, validator, ...]`: enqueues the metahint `T`, unless it's
/// ignorable (e.g. `Annotated[Any, V]`), in which case it contributes no
/// check of its own and is dropped rather than enqueued -- an ignorable
/// child must never reach the BFS driver's dequeue (spec.md §4.E step 2;
/// `HintCodegenError::HintIgnorablePresent` guards the inverse mistake).
/// For each validator, binds its required auxiliary values and fills its
/// `{obj}`/`{indent}` template slots (spec.md §4.F "Annotated"). A
/// validator whose required bindings collide by name with an unequal value
/// already in scope surfaces as `Binder`'s own `DuplicateName`, not a new
/// error kind here.
///
/// `HintCodegenError::MixedAnnotatedMetadata` (spec.md §7, "a non-first
/// argument is not a validator") is unreachable from this handler: this
/// crate's `validators: Vec<Arc<dyn Validator>>` makes non-validator
/// metadata at a non-first position unrepresentable in the first place, so
/// there is no runtime condition here to gate it on.
pub fn handle(meta : &HintMeta, binder : &mut Binder) -> HintCodegenResult<HandlerOutput> {
    let metahint = classifier::metahint_of(&meta.hint)
        .expect("Annotated hint always has a metahint");
    let validators = classifier::validators_of(&meta.hint);
    let child_indent = format!("{}{}", meta.indent, CODE_INDENT_1);

    let mut validator_conjuncts = Vec::new();
    for validator in &validators {
        for (name, value) in validator.required_bindings() {
            binder.bind_aux(name, value)?;
        }
        let rendered = validator.code_template()
            .replace("{obj}", meta.pith_ref())
            .replace("{indent}", &child_indent);
        validator_conjuncts.push(rendered);
    }

    if metahint.is_ignorable() {
        let code = if validator_conjuncts.is_empty() {
            format!("{}True", meta.indent)
        } else {
            format!("{}({})", meta.indent, validator_conjuncts.join(" and\n"))
        };
        return Ok(HandlerOutput::leaf(code));
    }

    let placeholder = placeholder::mint();
    let code = if validators.is_empty() {
        format!("{}{}", meta.indent, placeholder.as_str())
    } else {
        let validators_code = validator_conjuncts.join(&format!(" and\n{}", child_indent));
        template::annotated::child(&meta.indent, placeholder.as_str(), &validators_code)
    };

    let enqueue = ChildEnqueue {
        hint : metahint,
        placeholder,
        pith_expr : meta.pith_ref().to_string(),
        indent : child_indent,
    };

    Ok(HandlerOutput { code, children : vec![enqueue] })
}
