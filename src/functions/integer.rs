use crate::ast::{CallArgs, Value};
use crate::error::EvalError;
use crate::functions::{domain_error, range_error, FunctionNamespace};
use fofx_macros::namespace_fn;

pub fn register(namespace: &mut FunctionNamespace) {
    namespace.register_function("factorial", factorial);
    namespace.register_function("gcd", gcd);
    namespace.register_function("isqrt", isqrt);
}

#[namespace_fn]
pub fn factorial(n: i64) -> Result<i64, EvalError> {
    if n < 0 {
        return Err(domain_error("factorial"));
    }
    (2..=n).try_fold(1i64, |acc, k| acc.checked_mul(k).ok_or_else(|| range_error("factorial")))
}

/// Greatest common divisor of any number of ints; `gcd()` is 0.
pub fn gcd(args: &CallArgs) -> Result<Value, EvalError> {
    args.reject_keywords("gcd")?;
    let mut result: u64 = 0;
    for index in 0..args.len() {
        let mut a = result;
        let mut b = args.get_integer("gcd", index)?.unsigned_abs();
        while b != 0 {
            (a, b) = (b, a % b);
        }
        result = a;
    }
    i64::try_from(result)
        .map(Value::Int)
        .map_err(|_| range_error("gcd"))
}

/// Integer square root, rounded down.
#[namespace_fn]
pub fn isqrt(n: i64) -> Result<i64, EvalError> {
    if n < 0 {
        return Err(domain_error("isqrt"));
    }
    let mut root = (n as f64).sqrt() as i64;
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1)
        .checked_mul(root + 1)
        .map_or(false, |square| square <= n)
    {
        root += 1;
    }
    Ok(root)
}
