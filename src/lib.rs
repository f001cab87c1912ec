pub mod ast;
pub mod cache;
pub mod error;
pub mod functions;

pub use ast::{Bindings, Evaluator, EvaluatorBuilder, EvaluatorOptions, Value};
pub use cache::ExpressionCache;
pub use error::{ArithmeticError, EvalError, Result};

use once_cell::sync::Lazy;

static EXPRESSION_CACHE: Lazy<ExpressionCache> = Lazy::new(ExpressionCache::default);

/// Evaluates `expression` once with the default options, reusing a
/// process-wide cache of compiled expressions.
pub fn evaluate_expression(expression: &str, bindings: &Bindings) -> Result<Value> {
    let evaluator = EXPRESSION_CACHE.get_or_compile(expression, EvaluatorOptions::default())?;
    evaluator.evaluate(bindings)
}
