use crate::ast::{CallArgs, Value};
use crate::error::EvalError;
use crate::functions::{checked, domain_error, range_error, FunctionNamespace};
use fofx_macros::namespace_fn;

pub fn register(namespace: &mut FunctionNamespace) {
    namespace.register_function("fabs", fabs);
    namespace.register_function("floor", floor);
    namespace.register_function("ceil", ceil);
    namespace.register_function("trunc", trunc);
    namespace.register_function("fmod", fmod);
    namespace.register_function("copysign", copysign);
}

/// Rounds a float to an int with `round`; ints pass through unchanged.
fn to_integer(function: &str, value: Value, round: fn(f64) -> f64) -> Result<i64, EvalError> {
    let x = match value {
        Value::Int(n) => return Ok(n),
        Value::Float(x) => x,
        Value::Function(_) => {
            return Err(EvalError::ArgumentType {
                function: function.to_string(),
                position: 1,
                expected: "a number",
                found: value.type_name(),
            })
        }
    };

    if x.is_nan() {
        return Err(domain_error(function));
    }
    let rounded = round(x);
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(range_error(function));
    }
    Ok(rounded as i64)
}

#[namespace_fn]
pub fn fabs(x: f64) -> Result<f64, EvalError> {
    Ok(x.abs())
}

#[namespace_fn]
pub fn floor(x: Value) -> Result<i64, EvalError> {
    to_integer("floor", x, f64::floor)
}

#[namespace_fn]
pub fn ceil(x: Value) -> Result<i64, EvalError> {
    to_integer("ceil", x, f64::ceil)
}

#[namespace_fn]
pub fn trunc(x: Value) -> Result<i64, EvalError> {
    to_integer("trunc", x, f64::trunc)
}

/// C-style remainder: the result takes the sign of `x`.
#[namespace_fn]
pub fn fmod(x: f64, y: f64) -> Result<f64, EvalError> {
    if y == 0.0 || x.is_infinite() {
        return Err(domain_error("fmod"));
    }
    checked("fmod", &[x, y], x % y)
}

#[namespace_fn]
pub fn copysign(x: f64, y: f64) -> Result<f64, EvalError> {
    Ok(x.copysign(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Callable;
    use crate::error::ArithmeticError;

    fn one(value: Value) -> CallArgs {
        CallArgs::from(vec![value])
    }

    #[test]
    fn test_rounding_returns_ints() {
        assert_eq!(floor(&one(Value::Float(2.7))).unwrap(), Value::Int(2));
        assert_eq!(floor(&one(Value::Float(-2.1))).unwrap(), Value::Int(-3));
        assert_eq!(ceil(&one(Value::Float(2.1))).unwrap(), Value::Int(3));
        assert_eq!(trunc(&one(Value::Float(-2.7))).unwrap(), Value::Int(-2));
        assert_eq!(floor(&one(Value::Int(5))).unwrap(), Value::Int(5));
    }

    #[test]
    fn test_rounding_non_finite() {
        assert_eq!(
            floor(&one(Value::Float(f64::INFINITY))),
            Err(EvalError::Arithmetic(ArithmeticError::Range("floor".to_string())))
        );
        assert_eq!(
            ceil(&one(Value::Float(f64::NAN))),
            Err(EvalError::Arithmetic(ArithmeticError::Domain("ceil".to_string())))
        );
        assert_eq!(
            trunc(&one(Value::Float(1e300))),
            Err(EvalError::Arithmetic(ArithmeticError::Range("trunc".to_string())))
        );
    }

    #[test]
    fn test_rounding_rejects_functions() {
        let function = Value::Function(Callable::new("f", |_| Ok(Value::Int(0))));
        assert!(matches!(
            floor(&one(function)),
            Err(EvalError::ArgumentType { found: "function", .. })
        ));
    }

    #[test]
    fn test_fmod_and_copysign() {
        let args = CallArgs::from(vec![Value::Float(-7.5), Value::Int(2)]);
        assert_eq!(fmod(&args).unwrap(), Value::Float(-1.5));
        let args = CallArgs::from(vec![Value::Int(1), Value::Int(0)]);
        assert_eq!(
            fmod(&args),
            Err(EvalError::Arithmetic(ArithmeticError::Domain("fmod".to_string())))
        );
        let args = CallArgs::from(vec![Value::Float(3.0), Value::Float(-0.0)]);
        assert_eq!(copysign(&args).unwrap(), Value::Float(-3.0));
        assert_eq!(fabs(&one(Value::Int(-4))).unwrap(), Value::Float(4.0));
    }
}
