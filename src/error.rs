use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvalError>;

/// Everything that can go wrong while building or evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid character in expression: '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Syntax error: {0}")]
    SyntaxError(String),

    #[error("Variable or function not found: '{0}'")]
    NameNotFound(String),

    #[error("Invalid variable name: '{0}'")]
    ReservedName(String),

    #[error("Unsupported expression: {0}")]
    TypeError(String),

    #[error("'{type_name}' object has no attribute '{attribute}'")]
    AttributeNotFound {
        type_name: &'static str,
        attribute: String,
    },

    #[error("'{0}' object is not callable")]
    NotCallable(&'static str),

    #[error("unsupported operand type(s) for {operator}: '{left}' and '{right}'")]
    UnsupportedOperand {
        operator: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("bad operand type for unary {operator}: '{operand}'")]
    UnsupportedUnaryOperand {
        operator: &'static str,
        operand: &'static str,
    },

    #[error("{function}() takes {expected} positional argument(s) but {got} were given")]
    ArgumentCount {
        function: String,
        expected: String,
        got: usize,
    },

    #[error("{function}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword { function: String, keyword: String },

    #[error("{function}() argument {position} must be {expected}, not '{found}'")]
    ArgumentType {
        function: String,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Failures raised by the numeric operation itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {0}")]
    Overflow(&'static str),

    #[error("math domain error in {0}()")]
    Domain(String),

    #[error("math range error in {0}()")]
    Range(String),
}
