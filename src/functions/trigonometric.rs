use crate::ast::{CallArgs, Value};
use crate::error::EvalError;
use crate::functions::{checked, domain_error, FunctionNamespace};
use fofx_macros::namespace_fn;

pub fn register(namespace: &mut FunctionNamespace) {
    namespace.register_function("sin", sin);
    namespace.register_function("cos", cos);
    namespace.register_function("tan", tan);
    namespace.register_function("asin", asin);
    namespace.register_function("acos", acos);
    namespace.register_function("atan", atan);
    namespace.register_function("atan2", atan2);
    namespace.register_function("sinh", sinh);
    namespace.register_function("cosh", cosh);
    namespace.register_function("tanh", tanh);
    namespace.register_function("asinh", asinh);
    namespace.register_function("acosh", acosh);
    namespace.register_function("atanh", atanh);
    namespace.register_function("hypot", hypot);
    namespace.register_function("degrees", degrees);
    namespace.register_function("radians", radians);
}

#[namespace_fn]
pub fn sin(x: f64) -> Result<f64, EvalError> {
    checked("sin", &[x], x.sin())
}

#[namespace_fn]
pub fn cos(x: f64) -> Result<f64, EvalError> {
    checked("cos", &[x], x.cos())
}

#[namespace_fn]
pub fn tan(x: f64) -> Result<f64, EvalError> {
    checked("tan", &[x], x.tan())
}

#[namespace_fn]
pub fn asin(x: f64) -> Result<f64, EvalError> {
    checked("asin", &[x], x.asin())
}

#[namespace_fn]
pub fn acos(x: f64) -> Result<f64, EvalError> {
    checked("acos", &[x], x.acos())
}

#[namespace_fn]
pub fn atan(x: f64) -> Result<f64, EvalError> {
    checked("atan", &[x], x.atan())
}

/// `atan2(y, x)`
#[namespace_fn]
pub fn atan2(y: f64, x: f64) -> Result<f64, EvalError> {
    checked("atan2", &[y, x], y.atan2(x))
}

#[namespace_fn]
pub fn sinh(x: f64) -> Result<f64, EvalError> {
    checked("sinh", &[x], x.sinh())
}

#[namespace_fn]
pub fn cosh(x: f64) -> Result<f64, EvalError> {
    checked("cosh", &[x], x.cosh())
}

#[namespace_fn]
pub fn tanh(x: f64) -> Result<f64, EvalError> {
    checked("tanh", &[x], x.tanh())
}

#[namespace_fn]
pub fn asinh(x: f64) -> Result<f64, EvalError> {
    checked("asinh", &[x], x.asinh())
}

#[namespace_fn]
pub fn acosh(x: f64) -> Result<f64, EvalError> {
    checked("acosh", &[x], x.acosh())
}

#[namespace_fn]
pub fn atanh(x: f64) -> Result<f64, EvalError> {
    // The poles are outside the domain, not overflows.
    if x.abs() >= 1.0 {
        return Err(domain_error("atanh"));
    }
    checked("atanh", &[x], x.atanh())
}

#[namespace_fn]
pub fn hypot(x: f64, y: f64) -> Result<f64, EvalError> {
    checked("hypot", &[x, y], x.hypot(y))
}

#[namespace_fn]
pub fn degrees(x: f64) -> Result<f64, EvalError> {
    checked("degrees", &[x], x.to_degrees())
}

#[namespace_fn]
pub fn radians(x: f64) -> Result<f64, EvalError> {
    checked("radians", &[x], x.to_radians())
}
