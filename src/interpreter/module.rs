//! Host-supplied function and constant providers.
//!
//! A [`Module`] is a named bag of native functions and constants. The
//! interpreter searches imported modules in registration order when an
//! identifier is not a variable: constants of every module first, then
//! functions. The bundled [`math`] and [`text`] modules are built from static
//! tables with the `builtin_functions!` macro, and every bundled function
//! checks its arguments through a compiled [`signature::Signature`].

use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    error::EvalResult,
    interpreter::{module::signature::Signature, value::Value},
};

/// A native function callable from scripts.
pub type NativeFunction = Rc<dyn Fn(&[Value]) -> EvalResult<Value>>;

/// Signature of a builtin table entry.
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// One row of a builtin function table.
struct BuiltinDef {
    name:      &'static str,
    signature: &'static str,
    func:      BuiltinFn,
}

/// Defines a table of builtin functions.
///
/// Each entry provides:
/// - a string name,
/// - a signature pattern over the argument type letters (`N`, `S`),
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table installed by `install`),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                signature: $signature:literal,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[crate::interpreter::module::BuiltinDef] = &[
            $(
                crate::interpreter::module::BuiltinDef { name: $name, signature: $signature, func: $func },
            )*
        ];
        /// Names of the functions this module provides.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

/// Mathematical constants and functions.
pub mod math;
/// Argument type checking against signature patterns.
pub mod signature;
/// String functions.
pub mod text;

/// A named collection of functions and constants.
///
/// # Example
/// ```
/// use calcscript::{Interpreter, interpreter::{module::Module, value::Value}};
///
/// let units = Module::new("units").with_constant("inch", Value::number(254))
///                                 .with_function("twice", |args| {
///                                     Ok(Value::from(args[0].as_integer()? * 2))
///                                 });
///
/// let mut interpreter = Interpreter::new();
/// interpreter.import([units]);
/// interpreter.set_source("x = twice(inch)");
/// assert!(interpreter.run());
/// assert_eq!(interpreter.vars["x"], Value::from(508));
/// ```
#[derive(Clone, Default)]
pub struct Module {
    name:      String,
    functions: HashMap<String, NativeFunction>,
    constants: HashMap<String, Value>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               ..Self::default() }
    }

    /// Adds a constant.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: Value) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    /// Adds a function.
    #[must_use]
    pub fn with_function(mut self,
                         name: impl Into<String>,
                         function: impl Fn(&[Value]) -> EvalResult<Value> + 'static)
                         -> Self {
        self.functions.insert(name.into(), Rc::new(function));
        self
    }

    /// The module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a constant.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// Looks up a function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    /// Names of all functions, sorted.
    #[must_use]
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of all constants, sorted.
    #[must_use]
    pub fn constant_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.constants.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Adds every entry of a builtin table, wrapping each function with its
    /// signature check. Signatures are compiled here, once per function; a
    /// broken one surfaces as an error when the function is called.
    fn install(mut self, table: &'static [BuiltinDef]) -> Self {
        for def in table {
            let (name, func) = (def.name, def.func);
            let signature = Signature::new(def.signature);
            self = self.with_function(name, move |args: &[Value]| {
                                          signature.as_ref()
                                                   .map_err(Clone::clone)?
                                                   .verify(name, args)?;
                                          func(args)
                                      });
        }
        self
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
         .field("name", &self.name)
         .field("functions", &self.function_names())
         .field("constants", &self.constant_names())
         .finish()
    }
}

/// The modules imported by [`crate::Interpreter::with_default_modules`].
#[must_use]
pub fn default_modules() -> Vec<Module> {
    vec![math::module(), text::module()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn builder_registers_entries() {
        let module = Module::new("demo").with_constant("answer", Value::from(42))
                                        .with_function("id", |args| Ok(args[0].clone()));
        assert_eq!(module.name(), "demo");
        assert_eq!(module.constant("answer"), Some(&Value::from(42)));
        assert!(module.function("id").is_some());
        assert!(module.function("answer").is_none());
        assert_eq!(module.constant_names(), vec!["answer"]);
    }

    #[test]
    fn installed_builtins_check_signatures() {
        let module = math::module();
        let sqrt = module.function("sqrt").unwrap();
        let err = sqrt(&[Value::from("four")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(sqrt(&[Value::from(16)]).unwrap(), Value::from(4));
    }

    #[test]
    fn broken_signatures_fail_when_called() {
        static BROKEN: &[BuiltinDef] = &[BuiltinDef { name:      "broken",
                                                      signature: "N(",
                                                      func:      |_| Ok(Value::from(0)), }];
        let module = Module::new("host").install(BROKEN);
        let broken = module.function("broken").unwrap();
        assert_eq!(broken(&[Value::from(1)]).unwrap_err().kind, ErrorKind::UnknownError);
    }

    #[test]
    fn tables_match_registered_functions() {
        for module in default_modules() {
            let names = module.function_names();
            assert!(!names.is_empty(), "{}", module.name());
        }
        assert_eq!(math::module().function_names().len(), math::BUILTIN_FUNCTIONS.len());
        assert_eq!(text::module().function_names().len(), text::BUILTIN_FUNCTIONS.len());
    }
}
