use crate::binder::Binder;
use crate::classifier;
use crate::config::GenConfig;
use crate::hint_errors::HintCodegenResult;
use crate::placeholder;
use crate::queue::HintMeta;
use crate::template;

use super::{ ChildEnqueue, HandlerOutput, CODE_INDENT_1 };

const ARG_NAME_GETRANDBITS : &str = "get_random_index";

/// A sized sequence or variadic tuple (`List[T]`, `Tuple[T, ...]`): an
/// `isinstance` against the origin class, short-circuiting on emptiness,
/// then one check against a single sampled element (spec.md §4.F "Sized
/// sequence / variadic tuple"). Checking every element would make the
/// generated code's cost unbounded in the container's length, so only one
/// representative element is ever enqueued.
pub fn handle(meta : &HintMeta, binder : &mut Binder, config : &GenConfig) -> HintCodegenResult<HandlerOutput> {
    let origin = classifier::origin_class_of(&meta.hint)
        .expect("Sequence hint always has an origin class");
    let elem = classifier::sized_sequence_arg_of(&meta.hint)
        .expect("Sequence hint always has exactly one element hint");
    let origin_binding = binder.bind_type(origin)?;

    let elem_pith_expr = if config.bind_random_bits {
        let rand_name = binder.bind_getrandbits(ARG_NAME_GETRANDBITS)?;
        format!("{obj}[{rand}(len({obj}))]", obj = meta.pith_ref(), rand = rand_name)
    } else {
        format!("{}[0]", meta.pith_ref())
    };

    let child_placeholder = placeholder::mint();
    let code = template::sequence::args1(&meta.indent, meta.pith_ref(), &origin_binding, child_placeholder.as_str());

    let enqueue = ChildEnqueue {
        hint : elem,
        placeholder : child_placeholder,
        pith_expr : elem_pith_expr,
        indent : format!("{}{}", meta.indent, CODE_INDENT_1),
    };

    Ok(HandlerOutput { code, children : vec![enqueue] })
}
