use crate::ast::CallArgs;
use crate::error::{EvalError, Result};
use std::fmt;
use std::sync::Arc;

pub type Function = Arc<dyn Fn(&CallArgs) -> Result<Value> + Send + Sync>;

/// A named function obtained from a namespace, a binding or a bound attribute.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    function: Function,
}

impl Callable {
    pub fn new<F>(name: &str, function: F) -> Self
    where
        F: Fn(&CallArgs) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            function: Arc::new(function),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &CallArgs) -> Result<Value> {
        (self.function)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.function, &other.function)
    }
}

/// A numeric literal as written in the source.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Runtime value produced by evaluating a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Function(Callable),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Function(_) => "function",
        }
    }

    /// Numeric view of the value; ints are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Function(_) => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        if let Value::Function(callable) = self {
            Some(callable)
        } else {
            None
        }
    }

    /// Looks up one of the fixed attributes numbers expose.
    pub fn attribute(&self, name: &str) -> Result<Value> {
        match (self, name) {
            (Value::Int(_) | Value::Float(_), "real") => Ok(self.clone()),
            (Value::Int(_), "imag") => Ok(Value::Int(0)),
            (Value::Float(_), "imag") => Ok(Value::Float(0.0)),
            (Value::Int(_), "numerator") => Ok(self.clone()),
            (Value::Int(_), "denominator") => Ok(Value::Int(1)),
            (Value::Int(_) | Value::Float(_), "conjugate") => {
                let receiver = self.clone();
                Ok(Value::Function(Callable::new("conjugate", move |args| {
                    args.expect_count("conjugate", 0)?;
                    Ok(receiver.clone())
                })))
            }
            (Value::Float(x), "is_integer") => {
                let x = *x;
                Ok(Value::Function(Callable::new("is_integer", move |args| {
                    args.expect_count("is_integer", 0)?;
                    Ok(Value::Int((x.is_finite() && x.fract() == 0.0) as i64))
                })))
            }
            _ => Err(EvalError::AttributeNotFound {
                type_name: self.type_name(),
                attribute: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) if x.is_nan() => write!(f, "nan"),
            Value::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Function(callable) => write!(f, "<function {}>", callable.name()),
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(n) => Value::Int(n),
            Number::Float(x) => Value::Float(x),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<Callable> for Value {
    fn from(value: Callable) -> Self {
        Value::Function(value)
    }
}
