use crate::binder::AuxValue;

/// A user-supplied validator attachable to an `Annotated[T, validator, ...]`
/// hint (spec.md §6 "Validator capability"; §4.F "Annotated"). The core only
/// ever consumes these three surfaces -- it never constructs a validator or
/// inspects anything else about it, the same way `template` never inspects
/// anything about a hint beyond what `classifier` exposes.
pub trait Validator : std::fmt::Debug + Send + Sync {
    /// A code-template string with `{obj}` and `{indent}` slots (spec.md
    /// §4.F), filled in by `handlers::annotated` with the captured pith
    /// variable and the current indentation.
    fn code_template(&self) -> &str;

    /// Auxiliary-scope bindings this validator's generated expression
    /// closes over (e.g. a compiled regex object, a comparison bound).
    /// Merged into the wrapper's `AuxScope` by `handlers::annotated`.
    fn required_bindings(&self) -> Vec<(String, AuxValue)>;

    /// Stable identity distinguishing this validator instance from any
    /// other, used for `Hint` structural equality/hashing (two `Annotated`
    /// hints are equal only if they carry identical validators in the same
    /// order).
    fn identity(&self) -> u64;
}

/// A validator checking `{obj} {op} {operand}` for some comparison operator,
/// e.g. `Is[lambda n: n > 0]` lowered to `{obj} > 0`.
#[derive(Debug, Clone)]
pub struct ComparisonValidator {
    pub operand_binding_name : String,
    pub operand : AuxValue,
    // {obj} and {indent} are the only slots left open here; {op} and the
    // bound operand name are fixed at construction time and baked in below.
    template : String,
    id : u64,
}

impl ComparisonValidator {
    pub fn new(id : u64, op : impl Into<String>, operand_binding_name : impl Into<String>, operand : AuxValue) -> Self {
        let operand_binding_name = operand_binding_name.into();
        let template = format!("{{indent}}{{obj}} {} {}", op.into(), operand_binding_name);
        ComparisonValidator { operand_binding_name, operand, template, id }
    }
}

impl Validator for ComparisonValidator {
    fn code_template(&self) -> &str {
        &self.template
    }

    fn required_bindings(&self) -> Vec<(String, AuxValue)> {
        vec![(self.operand_binding_name.clone(), self.operand.clone())]
    }

    fn identity(&self) -> u64 {
        self.id
    }
}
