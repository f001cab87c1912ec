use crate::ast::{
    Bindings, CallArgs, CharacterSet, Expr, NameResolver, OperatorFn, Parser, ResolutionPolicy,
    Value, MAX_EXPRESSION_DEPTH,
};
use crate::error::{EvalError, Result};
use crate::functions::{math_namespace, FunctionNamespace};
use log::{debug, trace};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Construction-time options. Fixed for the lifetime of an evaluator.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct EvaluatorOptions {
    pub policy: ResolutionPolicy,
    pub character_set: CharacterSet,
}

/// A validated, parsed expression that can be evaluated any number of times
/// against fresh bindings.
#[derive(Debug, Clone)]
pub struct Evaluator {
    expression: Arc<Expr>,
    resolver: NameResolver,
}

impl Evaluator {
    /// Builds an evaluator with the standard math namespace enabled.
    pub fn new(source: &str) -> Result<Self> {
        EvaluatorBuilder::new(source).build()
    }

    /// Builds an evaluator, optionally disabling the namespace fallback.
    pub fn with_policy(source: &str, allow_function_namespace: bool) -> Result<Self> {
        EvaluatorBuilder::new(source)
            .allow_function_namespace(allow_function_namespace)
            .build()
    }

    pub fn builder(source: &str) -> EvaluatorBuilder {
        EvaluatorBuilder::new(source)
    }

    /// Wraps an already built tree. The tree is not validated, so malformed
    /// nodes surface as `TypeError` during evaluation.
    pub fn from_expression(
        expression: Expr,
        policy: ResolutionPolicy,
        namespace: Arc<FunctionNamespace>,
    ) -> Self {
        Self {
            expression: Arc::new(expression),
            resolver: NameResolver::new(policy, namespace),
        }
    }

    pub fn expression(&self) -> &Expr {
        &self.expression
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.resolver.policy()
    }

    /// Evaluates the expression against one binding set.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<Value> {
        debug!("Evaluating with {} binding(s)", bindings.len());
        let result = self.evaluate_node(&self.expression, bindings, 1)?;
        debug!("Evaluation result: {}", result);
        Ok(result)
    }

    /// Evaluates against plain float bindings and requires a numeric result.
    pub fn evaluate_f64(&self, bindings: &HashMap<String, f64>) -> Result<f64> {
        let bindings: Bindings = bindings
            .iter()
            .map(|(name, value)| (name.clone(), Value::Float(*value)))
            .collect();
        let result = self.evaluate(&bindings)?;
        result.as_f64().ok_or_else(|| {
            EvalError::TypeError(format!("expected a number, got {}", result.type_name()))
        })
    }

    /// Evaluates every binding set in parallel. Results keep the input order.
    pub fn evaluate_batch(&self, batch: &[Bindings]) -> Vec<Result<Value>> {
        debug!("Evaluating batch of {} binding set(s)", batch.len());
        batch
            .par_iter()
            .map(|bindings| self.evaluate(bindings))
            .collect()
    }

    fn evaluate_node(&self, node: &Expr, bindings: &Bindings, depth: usize) -> Result<Value> {
        trace!("Evaluating node: {:?}", node);
        if depth > MAX_EXPRESSION_DEPTH {
            return Err(EvalError::TypeError(format!(
                "expression is nested too deeply (limit {})",
                MAX_EXPRESSION_DEPTH
            )));
        }
        let depth = depth + 1;
        match node {
            Expr::Literal(number) => Ok(Value::from(*number)),

            Expr::Identifier(name) => {
                check_identifier(name)?;
                self.resolver.resolve(name, bindings)
            }

            Expr::BinaryOp {
                operator,
                left,
                right,
            } => {
                let OperatorFn::Binary(function) = operator.function() else {
                    return Err(EvalError::TypeError(format!(
                        "unary operator {:?} used as a binary operator",
                        operator
                    )));
                };
                let left_value = self.evaluate_node(left, bindings, depth)?;
                let right_value = self.evaluate_node(right, bindings, depth)?;
                function(&left_value, &right_value)
            }

            Expr::UnaryOp { operator, operand } => {
                let OperatorFn::Unary(function) = operator.function() else {
                    return Err(EvalError::TypeError(format!(
                        "binary operator {:?} used as a unary operator",
                        operator
                    )));
                };
                let value = self.evaluate_node(operand, bindings, depth)?;
                function(&value)
            }

            Expr::Attribute { base, attribute } => {
                check_identifier(attribute)?;
                let value = self.evaluate_node(base, bindings, depth)?;
                value.attribute(attribute)
            }

            Expr::Call {
                callee,
                args,
                keywords,
            } => {
                let callable = match self.evaluate_node(callee, bindings, depth)? {
                    Value::Function(callable) => callable,
                    other => return Err(EvalError::NotCallable(other.type_name())),
                };

                let mut call_args = CallArgs::new();
                for arg in args {
                    call_args.push(self.evaluate_node(arg, bindings, depth)?);
                }
                for (name, value) in keywords {
                    check_identifier(name)?;
                    call_args.insert(name, self.evaluate_node(value, bindings, depth)?);
                }

                debug!(
                    "Calling {} with {} argument(s)",
                    callable.name(),
                    call_args.len()
                );
                callable.call(&call_args)
            }
        }
    }
}

/// Rejects names a parser could never have produced.
fn check_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(EvalError::TypeError(format!("invalid name {:?}", name)))
    }
}

/// Configures and builds an [`Evaluator`].
#[derive(Debug, Clone)]
pub struct EvaluatorBuilder {
    source: String,
    options: EvaluatorOptions,
    namespace: Option<Arc<FunctionNamespace>>,
}

impl EvaluatorBuilder {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            options: EvaluatorOptions::default(),
            namespace: None,
        }
    }

    pub fn allow_function_namespace(mut self, allow: bool) -> Self {
        self.options.policy = ResolutionPolicy::from_flag(allow);
        self
    }

    pub fn policy(mut self, policy: ResolutionPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    pub fn character_set(mut self, character_set: CharacterSet) -> Self {
        self.options.character_set = character_set;
        self
    }

    pub fn options(mut self, options: EvaluatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the standard math namespace.
    pub fn namespace(mut self, namespace: Arc<FunctionNamespace>) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Validates and parses the source.
    pub fn build(self) -> Result<Evaluator> {
        self.options.character_set.validate(&self.source)?;
        let expression = Parser::parse_expression(&self.source)?;
        let namespace = self.namespace.unwrap_or_else(math_namespace);
        Ok(Evaluator::from_expression(
            expression,
            self.options.policy,
            namespace,
        ))
    }
}
