#![forbid(unsafe_code)]

//! Given a declarative, tree-shaped type hint, generates a self-contained
//! boolean expression deciding whether a bound value conforms to it, plus
//! the auxiliary name/value scope the expression closes over and the list
//! of not-yet-resolved forward-reference basenames it references. The
//! generator is memoized on the hint: the same hint always yields
//! byte-identical code regardless of call site.

pub mod binder;
pub mod classifier;
pub mod config;
pub mod generator;
pub mod handlers;
pub mod hint;
pub mod hint_errors;
pub mod memo;
pub mod placeholder;
pub mod queue;
pub mod sign;
pub mod template;
pub mod validator;

pub use config::GenConfig;
pub use generator::{ generate, GeneratedCode };
pub use hint::{
    mk_annotated, mk_forward_ref, mk_generic, mk_instance, mk_instance_ignorable, mk_literal,
    mk_sequence, mk_subclass, mk_tuple_fixed, mk_union, ClassRef, Hint, LiteralValue, SubclassTarget,
};
pub use hint_errors::{ HintCodegenError, HintCodegenResult };
pub use memo::generate_memoized;
pub use sign::Sign;
pub use validator::{ ComparisonValidator, Validator };
