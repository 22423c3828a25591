use crate::binder::Binder;
use crate::classifier;
use crate::hint::SubclassTarget;
use crate::hint_errors::HintCodegenResult;
use crate::queue::HintMeta;
use crate::template;

use super::HandlerOutput;

/// `Type[T]` / `Type[Union[T1, T2]]`: is-subclass-of check against either a
/// single bound class or a bound tuple of classes (spec.md §4.F
/// "Subclass-of"). A forward-referenced target defers to the same
/// registry slot a `ForwardRef` hint would use. Always a leaf.
pub fn handle(meta : &HintMeta, binder : &mut Binder, fwdref_basenames : &mut Vec<String>) -> HintCodegenResult<HandlerOutput> {
    let target = classifier::subclass_superclass_of(&meta.hint)
        .expect("Subclass hint always has a target");
    let target_binding = match target {
        SubclassTarget::Class(class) => binder.bind_type(class)?,
        SubclassTarget::Classes(classes) => binder.bind_type_or_types(classes)?,
        SubclassTarget::ForwardRef(name) => binder.bind_forwardref(&name, fwdref_basenames)?,
    };
    let code = template::subclass::check(&meta.indent, meta.pith_ref(), &target_binding);
    Ok(HandlerOutput::leaf(code))
}
