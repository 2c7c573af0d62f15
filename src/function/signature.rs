//! Common signature plumbing shared by all function kinds.

use crate::types::LogicalType;

/// Common view over a function signature, used by the generic overload
/// resolver and by cast insertion.
pub trait FunctionSignature {
    /// Function name.
    fn name(&self) -> &str;

    /// Declared fixed parameter types.
    fn arguments(&self) -> &[LogicalType];

    /// Mutable access to the fixed parameter types, for wildcard resolution
    /// before cast insertion.
    fn arguments_mut(&mut self) -> &mut Vec<LogicalType>;

    /// Trailing variadic parameter type, if the function is variadic. The
    /// variadic type applies to every call position past the fixed list.
    fn varargs(&self) -> Option<&LogicalType>;

    /// Mutable access to the variadic type.
    fn varargs_mut(&mut self) -> Option<&mut LogicalType>;

    /// Declared return type, when the function kind has one.
    fn return_type(&self) -> Option<&LogicalType> {
        None
    }

    /// Renders the signature for diagnostics, e.g.
    /// `concat(VARCHAR, VARCHAR...) -> VARCHAR`.
    fn signature_string(&self) -> String {
        let mut args: Vec<String> = self.arguments().iter().map(ToString::to_string).collect();
        if let Some(varargs) = self.varargs() {
            args.push(format!("{varargs}..."));
        }
        let mut rendered = format!("{}({})", self.name(), args.join(", "));
        if let Some(return_type) = self.return_type() {
            rendered.push_str(&format!(" -> {return_type}"));
        }
        rendered
    }
}

/// Renders a call site for diagnostics, e.g. `lower(VARCHAR)`.
#[must_use]
pub fn call_signature(name: &str, arguments: &[LogicalType]) -> String {
    let args: Vec<String> = arguments.iter().map(ToString::to_string).collect();
    format!("{name}({})", args.join(", "))
}

/// An ordered collection of overloads registered under one name.
///
/// Registration order does not affect which overload wins resolution, but
/// it does determine the order candidates are enumerated in diagnostics.
#[derive(Debug, Clone)]
pub struct FunctionSet<T> {
    /// Name shared by every overload in the set.
    pub name: String,
    /// Overloads in registration order.
    pub functions: Vec<T>,
}

impl<T> FunctionSet<T> {
    /// Creates an empty overload set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        FunctionSet {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    /// Appends an overload to the set.
    pub fn push(&mut self, function: T) {
        self.functions.push(function);
    }

    /// Appends an overload, builder style.
    #[must_use]
    pub fn with_function(mut self, function: T) -> Self {
        self.functions.push(function);
        self
    }

    /// Returns the overload at `offset`.
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&T> {
        self.functions.get(offset)
    }

    /// Returns the number of overloads in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if the set has no overloads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
