//! One module per sign family (spec.md §4.F), matching `handlers::union`,
//! `handlers::sequence`, `handlers::tuple`, `handlers::annotated`,
//! `handlers::subclass`, `handlers::generic`, `handlers::literal`,
//! `handlers::forward_ref`, `handlers::instance`. `dispatch` is the single
//! `match` on `Sign` that `generator` calls per dequeue; individual
//! handlers never call each other directly.

pub mod annotated;
pub mod forward_ref;
pub mod generic;
pub mod instance;
pub mod literal;
pub mod sequence;
pub mod subclass;
pub mod tuple;
pub mod union;

use crate::binder::Binder;
use crate::config::GenConfig;
use crate::hint::Hint;
use crate::hint_errors::HintCodegenResult;
use crate::placeholder::Placeholder;
use crate::queue::HintMeta;
use crate::sign::Sign;

/// A child hint this handler wants enqueued for its own BFS turn, paired
/// with the placeholder its future code will fill and the pith expression
/// it should be checked against.
pub struct ChildEnqueue {
    pub hint : Hint,
    pub placeholder : Placeholder,
    pub pith_expr : String,
    pub indent : String,
}

/// A handler's result: the code fragment for this dequeue (with any
/// children's placeholders already embedded at the right spot) plus the
/// children themselves, in enqueue order.
pub struct HandlerOutput {
    pub code : String,
    pub children : Vec<ChildEnqueue>,
}

impl HandlerOutput {
    pub fn leaf(code : String) -> Self {
        HandlerOutput { code, children : Vec::new() }
    }
}

pub const CODE_INDENT_1 : &str = "    ";

/// Dispatches a dequeued item to its sign's handler. The only place in the
/// crate this `match` appears; a `Sign` variant with no arm here is a
/// compile error, not a runtime one -- `InternalSignUnhandled` exists for
/// the case where `classifier::sign_of` and this match disagree despite
/// both compiling, which would indicate a bug in one of them rather than a
/// missing arm.
pub fn dispatch(
    sign : Sign,
    meta : &HintMeta,
    binder : &mut Binder,
    config : &GenConfig,
    fwdref_basenames : &mut Vec<String>,
) -> HintCodegenResult<HandlerOutput> {
    match sign {
        Sign::Instance => instance::handle(meta, binder),
        Sign::ForwardRef => forward_ref::handle(meta, binder, fwdref_basenames),
        Sign::Union => union::handle(meta, binder),
        Sign::SequenceArgs1 => sequence::handle(meta, binder, config),
        Sign::Tuple => tuple::handle(meta, binder),
        Sign::Annotated => annotated::handle(meta, binder),
        Sign::Subclass => subclass::handle(meta, binder, fwdref_basenames),
        Sign::Generic => generic::handle(meta, binder),
        Sign::Literal => literal::handle(meta, binder),
    }
}
