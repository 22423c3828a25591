use crate::binder::Binder;
use crate::hint::InnerHint;
use crate::hint_errors::HintCodegenResult;
use crate::queue::HintMeta;
use crate::template;

use super::HandlerOutput;

/// A textual forward reference: bind a slot in the forward-reference
/// registry under its dotted name and emit an `isinstance` check against
/// whatever that slot resolves to at check time. Always a leaf; resolution
/// itself is the out-of-scope registry's job (spec.md §1).
pub fn handle(meta : &HintMeta, binder : &mut Binder, fwdref_basenames : &mut Vec<String>) -> HintCodegenResult<HandlerOutput> {
    let name = match meta.hint.as_ref() {
        InnerHint::ForwardRef { name, .. } => name.as_str(),
        _ => unreachable!("handlers::forward_ref dispatched a non-ForwardRef hint"),
    };
    let resolved_binding = binder.bind_forwardref(name, fwdref_basenames)?;
    let code = template::forward_ref::check(&meta.indent, meta.pith_ref(), &resolved_binding);
    Ok(HandlerOutput::leaf(code))
}
