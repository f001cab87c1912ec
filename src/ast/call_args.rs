use crate::ast::Value;
use crate::error::{EvalError, Result};

/// Arguments handed to a callable: positional values in source order, then
/// keyword values in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallArgs {
    pub(crate) positional: Vec<Value>,
    pub(crate) keywords: Vec<(String, Value)>,
}

impl CallArgs {
    /// Creates an empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_args(positional: Vec<Value>, keywords: Vec<(String, Value)>) -> Self {
        Self {
            positional,
            keywords,
        }
    }

    /// Appends a positional argument
    pub fn push<T: Into<Value>>(&mut self, value: T) {
        self.positional.push(value.into());
    }

    /// Appends a keyword argument
    pub fn insert<T: Into<Value>>(&mut self, key: &str, value: T) {
        self.keywords.push((key.to_string(), value.into()));
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    /// Number of positional arguments
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    pub fn keyword(&self, key: &str) -> Option<&Value> {
        self.keywords
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Fails on the first keyword argument, for functions that only take
    /// positional arguments.
    pub fn reject_keywords(&self, function: &str) -> Result<()> {
        match self.keywords.first() {
            Some((keyword, _)) => Err(EvalError::UnexpectedKeyword {
                function: function.to_string(),
                keyword: keyword.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Requires exactly `expected` positional arguments and no keywords.
    pub fn expect_count(&self, function: &str, expected: usize) -> Result<()> {
        self.reject_keywords(function)?;
        if self.positional.len() != expected {
            return Err(EvalError::ArgumentCount {
                function: function.to_string(),
                expected: expected.to_string(),
                got: self.positional.len(),
            });
        }
        Ok(())
    }

    /// Requires between `min` and `max` positional arguments and no keywords.
    pub fn expect_range(&self, function: &str, min: usize, max: usize) -> Result<()> {
        self.reject_keywords(function)?;
        let got = self.positional.len();
        if got < min || got > max {
            return Err(EvalError::ArgumentCount {
                function: function.to_string(),
                expected: format!("{} to {}", min, max),
                got,
            });
        }
        Ok(())
    }

    /// Retrieves a positional argument as a float; ints are widened.
    pub fn get_number(&self, function: &str, index: usize) -> Result<f64> {
        let value = self.get_value(function, index)?;
        value.as_f64().ok_or_else(|| EvalError::ArgumentType {
            function: function.to_string(),
            position: index + 1,
            expected: "a number",
            found: value.type_name(),
        })
    }

    /// Retrieves a positional argument that must be an int.
    pub fn get_integer(&self, function: &str, index: usize) -> Result<i64> {
        match self.get_value(function, index)? {
            Value::Int(n) => Ok(*n),
            other => Err(EvalError::ArgumentType {
                function: function.to_string(),
                position: index + 1,
                expected: "an integer",
                found: other.type_name(),
            }),
        }
    }

    pub fn get_value(&self, function: &str, index: usize) -> Result<&Value> {
        self.positional
            .get(index)
            .ok_or_else(|| EvalError::ArgumentCount {
                function: function.to_string(),
                expected: format!("at least {}", index + 1),
                got: self.positional.len(),
            })
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(value: Vec<Value>) -> Self {
        Self::with_args(value, Vec::new())
    }
}
