use crate::binder::Binder;
use crate::classifier;
use crate::hint_errors::HintCodegenResult;
use crate::queue::HintMeta;
use crate::template;

use super::HandlerOutput;

/// A plain, unparameterized class: bind its origin class and emit a bare
/// `isinstance` check. Always a leaf.
pub fn handle(meta : &HintMeta, binder : &mut Binder) -> HintCodegenResult<HandlerOutput> {
    let class = classifier::origin_class_of(&meta.hint)
        .expect("Instance hint always has an origin class");
    let cls_binding = binder.bind_type(class)?;
    let code = template::instance(&meta.indent, meta.pith_ref(), &cls_binding);
    Ok(HandlerOutput::leaf(code))
}
