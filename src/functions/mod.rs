pub mod exponential;
pub mod integer;
pub mod rounding;
pub mod trigonometric;

use crate::ast::{CallArgs, Callable, Value};
use crate::error::{ArithmeticError, EvalError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A closed table of functions and constants that expressions may reach when
/// the namespace fallback is enabled. Nothing outside this table is reachable.
#[derive(Clone, Default)]
pub struct FunctionNamespace {
    members: HashMap<String, Value>,
}

impl FunctionNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function under `name`, replacing any previous member.
    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&CallArgs) -> Result<Value> + Send + Sync + 'static,
    {
        self.members
            .insert(name.to_string(), Value::Function(Callable::new(name, function)));
    }

    /// Registers a numeric constant under `name`, replacing any previous member.
    pub fn register_constant<T: Into<Value>>(&mut self, name: &str, value: T) {
        self.members.insert(name.to_string(), value.into());
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.members.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Member names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for FunctionNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionNamespace")
            .field("members", &self.names())
            .finish()
    }
}

/// Registers the standard math constants and functions.
pub fn register_functions(namespace: &mut FunctionNamespace) {
    namespace.register_constant("pi", std::f64::consts::PI);
    namespace.register_constant("e", std::f64::consts::E);
    namespace.register_constant("tau", std::f64::consts::TAU);
    namespace.register_constant("inf", f64::INFINITY);
    namespace.register_constant("nan", f64::NAN);

    trigonometric::register(namespace);
    exponential::register(namespace);
    rounding::register(namespace);
    integer::register(namespace);
}

static MATH_NAMESPACE: Lazy<Arc<FunctionNamespace>> = Lazy::new(|| {
    let mut namespace = FunctionNamespace::new();
    register_functions(&mut namespace);
    Arc::new(namespace)
});

/// The process-wide standard math namespace, built on first use.
pub fn math_namespace() -> Arc<FunctionNamespace> {
    Arc::clone(&MATH_NAMESPACE)
}

pub(crate) fn domain_error(function: &str) -> EvalError {
    ArithmeticError::Domain(function.to_string()).into()
}

pub(crate) fn range_error(function: &str) -> EvalError {
    ArithmeticError::Range(function.to_string()).into()
}

/// Maps a NaN produced from non-NaN inputs to a domain error and an infinity
/// produced from finite inputs to a range error.
pub(crate) fn checked(function: &str, inputs: &[f64], result: f64) -> Result<f64> {
    if result.is_nan() && !inputs.iter().any(|x| x.is_nan()) {
        return Err(domain_error(function));
    }
    if result.is_infinite() && inputs.iter().all(|x| x.is_finite()) {
        return Err(range_error(function));
    }
    Ok(result)
}
