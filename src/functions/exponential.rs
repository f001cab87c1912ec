use crate::ast::{CallArgs, Value};
use crate::error::{ArithmeticError, EvalError};
use crate::functions::{checked, domain_error, FunctionNamespace};
use fofx_macros::namespace_fn;

pub fn register(namespace: &mut FunctionNamespace) {
    namespace.register_function("sqrt", sqrt);
    namespace.register_function("cbrt", cbrt);
    namespace.register_function("exp", exp);
    namespace.register_function("exp2", exp2);
    namespace.register_function("expm1", expm1);
    namespace.register_function("log", log);
    namespace.register_function("log2", log2);
    namespace.register_function("log10", log10);
    namespace.register_function("log1p", log1p);
    namespace.register_function("pow", pow);
}

#[namespace_fn]
pub fn sqrt(x: f64) -> Result<f64, EvalError> {
    checked("sqrt", &[x], x.sqrt())
}

#[namespace_fn]
pub fn cbrt(x: f64) -> Result<f64, EvalError> {
    checked("cbrt", &[x], x.cbrt())
}

#[namespace_fn]
pub fn exp(x: f64) -> Result<f64, EvalError> {
    checked("exp", &[x], x.exp())
}

#[namespace_fn]
pub fn exp2(x: f64) -> Result<f64, EvalError> {
    checked("exp2", &[x], x.exp2())
}

#[namespace_fn]
pub fn expm1(x: f64) -> Result<f64, EvalError> {
    checked("expm1", &[x], x.exp_m1())
}

/// `log(x)` is the natural logarithm; `log(x, base)` uses the given base.
pub fn log(args: &CallArgs) -> Result<Value, EvalError> {
    args.expect_range("log", 1, 2)?;
    let x = args.get_number("log", 0)?;
    if x <= 0.0 {
        return Err(domain_error("log"));
    }
    let numerator = checked("log", &[x], x.ln())?;

    if args.len() == 1 {
        return Ok(Value::Float(numerator));
    }

    let base = args.get_number("log", 1)?;
    if base <= 0.0 {
        return Err(domain_error("log"));
    }
    let denominator = checked("log", &[base], base.ln())?;
    if denominator == 0.0 {
        return Err(ArithmeticError::DivisionByZero.into());
    }
    Ok(Value::Float(numerator / denominator))
}

#[namespace_fn]
pub fn log2(x: f64) -> Result<f64, EvalError> {
    if x <= 0.0 {
        return Err(domain_error("log2"));
    }
    checked("log2", &[x], x.log2())
}

#[namespace_fn]
pub fn log10(x: f64) -> Result<f64, EvalError> {
    if x <= 0.0 {
        return Err(domain_error("log10"));
    }
    checked("log10", &[x], x.log10())
}

#[namespace_fn]
pub fn log1p(x: f64) -> Result<f64, EvalError> {
    if x <= -1.0 {
        return Err(domain_error("log1p"));
    }
    checked("log1p", &[x], x.ln_1p())
}

/// Float power; unlike `**` it never returns an int.
#[namespace_fn]
pub fn pow(x: f64, y: f64) -> Result<f64, EvalError> {
    if x == 0.0 && y < 0.0 {
        return Err(domain_error("pow"));
    }
    checked("pow", &[x, y], x.powf(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[f64]) -> CallArgs {
        CallArgs::from(values.iter().copied().map(Value::Float).collect::<Vec<_>>())
    }

    fn domain(function: &str) -> Result<Value, EvalError> {
        Err(EvalError::Arithmetic(ArithmeticError::Domain(function.to_string())))
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(&args(&[4.0])).unwrap(), Value::Float(2.0));
        assert_eq!(sqrt(&CallArgs::from(vec![Value::Int(9)])).unwrap(), Value::Float(3.0));
        assert_eq!(sqrt(&args(&[-1.0])), domain("sqrt"));
    }

    #[test]
    fn test_log_natural_and_with_base() {
        assert_eq!(log(&args(&[1.0])).unwrap(), Value::Float(0.0));
        let value = log(&args(&[8.0, 2.0])).unwrap().as_f64().unwrap();
        assert!((value - 3.0).abs() < 1e-12);
        assert_eq!(log10(&args(&[1000.0])).unwrap(), Value::Float(3.0));
        assert_eq!(log2(&args(&[8.0])).unwrap(), Value::Float(3.0));
    }

    #[test]
    fn test_log_domain() {
        assert_eq!(log(&args(&[0.0])), domain("log"));
        assert_eq!(log(&args(&[-2.0])), domain("log"));
        assert_eq!(log(&args(&[2.0, -2.0])), domain("log"));
        assert_eq!(log1p(&args(&[-1.0])), domain("log1p"));
        assert_eq!(
            log(&args(&[10.0, 1.0])),
            Err(EvalError::Arithmetic(ArithmeticError::DivisionByZero))
        );
    }

    #[test]
    fn test_log_arity() {
        assert!(matches!(
            log(&args(&[1.0, 2.0, 3.0])),
            Err(EvalError::ArgumentCount { got: 3, .. })
        ));
    }

    #[test]
    fn test_exp_overflow_is_range_error() {
        assert_eq!(
            exp(&args(&[1000.0])),
            Err(EvalError::Arithmetic(ArithmeticError::Range("exp".to_string())))
        );
        assert_eq!(exp(&args(&[0.0])).unwrap(), Value::Float(1.0));
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(&args(&[2.0, 10.0])).unwrap(), Value::Float(1024.0));
        assert_eq!(pow(&args(&[0.0, -1.0])), domain("pow"));
        assert_eq!(pow(&args(&[-8.0, 1.0 / 3.0])), domain("pow"));
    }
}
