use crate::binder::Binder;
use crate::classifier;
use crate::hint_errors::{ HintCodegenError, HintCodegenResult };
use crate::queue::HintMeta;
use crate::template;

use super::HandlerOutput;

/// `Literal[...]`: a pre-filter `isinstance` against the set of distinct
/// classes spanned by the literal's values (e.g. `Literal[1, "x", None]`
/// pre-filters on `(int, str, NoneType)`), followed by membership in a
/// bound tuple of the values themselves (spec.md §4.F "Literal"). Always a
/// leaf.
pub fn handle(meta : &HintMeta, binder : &mut Binder) -> HintCodegenResult<HandlerOutput> {
    let values = classifier::literal_values_of(&meta.hint);
    if values.is_empty() {
        return Err(HintCodegenError::HintNonCompliant { detail : "Literal hint with no values".to_string() });
    }
    let mut classes = Vec::new();
    for value in &values {
        let class = value.class();
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    let origin_binding = binder.bind_type_or_types(classes)?;

    let mut code = template::literal::prefix(&meta.indent, meta.pith_ref(), &origin_binding);
    for value in values {
        let value_binding = binder.bind_value(value)?;
        code.push_str(&template::literal::child(&value_binding));
    }
    code.push_str(&template::literal::suffix(""));

    Ok(HandlerOutput::leaf(code))
}
