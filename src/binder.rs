use indexmap::IndexMap;

use crate::hint::{ ClassRef, LiteralValue };
use crate::hint_errors::{ HintCodegenError, HintCodegenResult };

/// A value bound into a wrapper's auxiliary scope (spec.md §3 "Auxiliary
/// scope"). The host decorator injects these as the default-argument
/// closure of the compiled wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum AuxValue {
    Type(ClassRef),
    /// A tuple of classes bound together, e.g. for a single `isinstance`
    /// call against a `Union`'s non-PEP-compliant children.
    Types(Vec<ClassRef>),
    Literal(LiteralValue),
    /// A slot in the forward-reference registry (external collaborator,
    /// spec.md §1), indexed by the reference's dotted name.
    ForwardRefSlot(String),
    /// The `random.getrandbits`-equivalent callable used by the sized
    /// sequence handler to select a random element (spec.md §4.F).
    GetRandBits,
}

/// Insertion-order-preserving name -> value scope (spec.md §3 "Auxiliary
/// scope"). Mirrors this crate's lineage's own choice of `indexmap` for
/// exactly this "stable iteration order, O(1) lookup" shape (see
/// `tracing::UNIV_TRACE_ITEMS`, an `IndexSet`).
pub type AuxScope = IndexMap<String, AuxValue>;

/// Registers classes, class-tuples, arbitrary values, and forward
/// references into a per-wrapper `AuxScope`, minting a fresh bound name for
/// each first-seen value and returning a code expression (just the bound
/// name) referencing it thereafter. Binding the same value twice is
/// idempotent; binding two different values to an already-used name is a
/// `DuplicateName` -- this can only happen inside `Binder` itself, since
/// `Binder` is the only thing that mints names.
#[derive(Debug, Default)]
pub struct Binder {
    scope : AuxScope,
    next_type_idx : usize,
    next_value_idx : usize,
    next_fwdref_idx : usize,
}

impl Binder {
    pub fn new() -> Self {
        Binder::default()
    }

    pub fn into_scope(self) -> AuxScope {
        self.scope
    }

    pub fn scope_ref(&self) -> &AuxScope {
        &self.scope
    }

    fn insert(&mut self, name : String, value : AuxValue) -> HintCodegenResult<String> {
        match self.scope.get(&name) {
            Some(existing) if *existing == value => Ok(name),
            Some(_) => Err(HintCodegenError::DuplicateName { name }),
            None => {
                self.scope.insert(name.clone(), value);
                Ok(name)
            }
        }
    }

    /// Finds an existing binding with this exact value, if any, so repeated
    /// calls with equal inputs return the same expression (spec.md §6
    /// "Binder ... returns stable expression strings; equal inputs yield
    /// equal expressions").
    fn find_existing(&self, value : &AuxValue) -> Option<String> {
        self.scope.iter().find(|(_, v)| *v == value).map(|(k, _)| k.clone())
    }

    pub fn bind_type(&mut self, class : ClassRef) -> HintCodegenResult<String> {
        let value = AuxValue::Type(class);
        if let Some(name) = self.find_existing(&value) {
            return Ok(name);
        }
        let name = format!("cls_{}", self.next_type_idx);
        self.next_type_idx += 1;
        self.insert(name, value)
    }

    pub fn bind_types(&mut self, classes : Vec<ClassRef>) -> HintCodegenResult<String> {
        let value = AuxValue::Types(classes);
        if let Some(name) = self.find_existing(&value) {
            return Ok(name);
        }
        let name = format!("clss_{}", self.next_type_idx);
        self.next_type_idx += 1;
        self.insert(name, value)
    }

    /// Polymorphic convenience covering `Subclass`'s "single class or tuple
    /// of classes" target (spec.md §4.F).
    pub fn bind_type_or_types(&mut self, classes : Vec<ClassRef>) -> HintCodegenResult<String> {
        match <[ClassRef; 1]>::try_from(classes.clone()) {
            Ok([only]) => self.bind_type(only),
            Err(_) => self.bind_types(classes),
        }
    }

    pub fn bind_value(&mut self, literal : LiteralValue) -> HintCodegenResult<String> {
        let value = AuxValue::Literal(literal);
        if let Some(name) = self.find_existing(&value) {
            return Ok(name);
        }
        let name = format!("lit_{}", self.next_value_idx);
        self.next_value_idx += 1;
        self.insert(name, value)
    }

    /// Registers a forward reference. If the reference is relative (no dots
    /// in its dotted name), its unqualified basename is added to `accum` so
    /// the caller can register a corresponding runtime-resolution shim
    /// (spec.md §3 "Forward-reference basenames").
    pub fn bind_forwardref(&mut self, dotted_name : &str, accum : &mut Vec<String>) -> HintCodegenResult<String> {
        if dotted_name.is_empty() || !is_valid_dotted_name(dotted_name) {
            return Err(HintCodegenError::ForwardRefMalformed { name : dotted_name.to_string() });
        }
        let value = AuxValue::ForwardRefSlot(dotted_name.to_string());
        let name = if let Some(existing) = self.find_existing(&value) {
            existing
        } else {
            let name = format!("fwdref_{}", self.next_fwdref_idx);
            self.next_fwdref_idx += 1;
            self.insert(name, value)?
        };
        if !dotted_name.contains('.') && !accum.contains(&dotted_name.to_string()) {
            accum.push(dotted_name.to_string());
        }
        Ok(name)
    }

    pub fn bind_getrandbits(&mut self, arg_name : &str) -> HintCodegenResult<String> {
        self.insert(arg_name.to_string(), AuxValue::GetRandBits)
    }

    /// Binds an arbitrary caller-chosen name to a value, used for a
    /// validator's `Validator::required_bindings` (which name their own
    /// bound identifiers rather than having `Binder` mint one).
    pub fn bind_aux(&mut self, name : String, value : AuxValue) -> HintCodegenResult<String> {
        self.insert(name, value)
    }
}

fn is_valid_dotted_name(s : &str) -> bool {
    s.split('.').all(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
            _ => false,
        }
    })
}

#[cfg(test)]
mod binder_tests {
    use super::*;

    #[test]
    fn bind_type_is_idempotent() {
        let mut b = Binder::new();
        let e1 = b.bind_type(ClassRef::builtin("builtins.int")).unwrap();
        let e2 = b.bind_type(ClassRef::builtin("builtins.int")).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(b.into_scope().len(), 1);
    }

    #[test]
    fn duplicate_name_rejected_on_unequal_values() {
        let mut b = Binder::new();
        b.insert("cls_0".to_string(), AuxValue::Type(ClassRef::builtin("builtins.int"))).unwrap();
        let err = b.insert("cls_0".to_string(), AuxValue::Type(ClassRef::builtin("builtins.str")));
        assert!(matches!(err, Err(HintCodegenError::DuplicateName { .. })));
    }

    #[test]
    fn relative_forwardref_recorded_absolute_is_not() {
        let mut b = Binder::new();
        let mut accum = Vec::new();
        b.bind_forwardref("MuhClass", &mut accum).unwrap();
        b.bind_forwardref("some.pkg.YoClass", &mut accum).unwrap();
        assert_eq!(accum, vec!["MuhClass".to_string()]);
    }

    #[test]
    fn malformed_forwardref_rejected() {
        let mut b = Binder::new();
        let mut accum = Vec::new();
        let err = b.bind_forwardref("not a name!", &mut accum);
        assert!(matches!(err, Err(HintCodegenError::ForwardRefMalformed { .. })));
    }
}
