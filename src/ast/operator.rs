use crate::ast::Value;
use crate::error::{ArithmeticError, EvalError, Result};

pub type BinaryFn = fn(&Value, &Value) -> Result<Value>;
pub type UnaryFn = fn(&Value) -> Result<Value>;

/// Entry of the operator table.
#[derive(Debug, Copy, Clone)]
pub enum OperatorFn {
    Binary(BinaryFn),
    Unary(UnaryFn),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    FloorDivide,
    BitXor,
    BitOr,
    BitAnd,
    Negate,
    Identity,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add | Operator::Identity => "+",
            Operator::Subtract | Operator::Negate => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Power => "**",
            Operator::FloorDivide => "//",
            Operator::BitXor => "^",
            Operator::BitOr => "|",
            Operator::BitAnd => "&",
        }
    }

    /// The operator table. Total over the closed set of operators.
    pub fn function(self) -> OperatorFn {
        match self {
            Operator::Add => OperatorFn::Binary(add),
            Operator::Subtract => OperatorFn::Binary(subtract),
            Operator::Multiply => OperatorFn::Binary(multiply),
            Operator::Divide => OperatorFn::Binary(divide),
            Operator::Modulo => OperatorFn::Binary(modulo),
            Operator::Power => OperatorFn::Binary(power),
            Operator::FloorDivide => OperatorFn::Binary(floor_divide),
            Operator::BitXor => OperatorFn::Binary(bit_xor),
            Operator::BitOr => OperatorFn::Binary(bit_or),
            Operator::BitAnd => OperatorFn::Binary(bit_and),
            Operator::Negate => OperatorFn::Unary(negate),
            Operator::Identity => OperatorFn::Unary(identity),
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self.function(), OperatorFn::Unary(_))
    }

    /// Resolves a unary operator symbol.
    pub fn unary(symbol: &str) -> std::result::Result<Self, String> {
        match symbol {
            "-" => Ok(Operator::Negate),
            "+" => Ok(Operator::Identity),
            _ => Err(format!("Unknown unary operator: {}", symbol)),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "%" => Ok(Operator::Modulo),
            "**" => Ok(Operator::Power),
            "//" => Ok(Operator::FloorDivide),
            "^" => Ok(Operator::BitXor),
            "|" => Ok(Operator::BitOr),
            "&" => Ok(Operator::BitAnd),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}

enum Operands {
    Ints(i64, i64),
    Floats(f64, f64),
}

fn operands(operator: Operator, left: &Value, right: &Value) -> Result<Operands> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Operands::Ints(*a, *b)),
        (Value::Int(a), Value::Float(b)) => Ok(Operands::Floats(*a as f64, *b)),
        (Value::Float(a), Value::Int(b)) => Ok(Operands::Floats(*a, *b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Operands::Floats(*a, *b)),
        _ => Err(unsupported(operator, left, right)),
    }
}

fn unsupported(operator: Operator, left: &Value, right: &Value) -> EvalError {
    EvalError::UnsupportedOperand {
        operator: operator.symbol(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn overflow(operator: Operator) -> EvalError {
    ArithmeticError::Overflow(operator.symbol()).into()
}

fn division_by_zero() -> EvalError {
    ArithmeticError::DivisionByZero.into()
}

/// Quotient and remainder with the remainder taking the divisor's sign.
fn float_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 {
        if (b < 0.0) != (rem < 0.0) {
            rem += b;
            div -= 1.0;
        }
    } else {
        rem = 0.0_f64.copysign(b);
    }
    let floordiv = if div != 0.0 {
        let floor = div.floor();
        if div - floor > 0.5 {
            floor + 1.0
        } else {
            floor
        }
    } else {
        0.0_f64.copysign(a / b)
    };
    (floordiv, rem)
}

fn add(left: &Value, right: &Value) -> Result<Value> {
    match operands(Operator::Add, left, right)? {
        Operands::Ints(a, b) => a
            .checked_add(b)
            .map(Value::Int)
            .ok_or_else(|| overflow(Operator::Add)),
        Operands::Floats(a, b) => Ok(Value::Float(a + b)),
    }
}

fn subtract(left: &Value, right: &Value) -> Result<Value> {
    match operands(Operator::Subtract, left, right)? {
        Operands::Ints(a, b) => a
            .checked_sub(b)
            .map(Value::Int)
            .ok_or_else(|| overflow(Operator::Subtract)),
        Operands::Floats(a, b) => Ok(Value::Float(a - b)),
    }
}

fn multiply(left: &Value, right: &Value) -> Result<Value> {
    match operands(Operator::Multiply, left, right)? {
        Operands::Ints(a, b) => a
            .checked_mul(b)
            .map(Value::Int)
            .ok_or_else(|| overflow(Operator::Multiply)),
        Operands::Floats(a, b) => Ok(Value::Float(a * b)),
    }
}

fn divide(left: &Value, right: &Value) -> Result<Value> {
    let (a, b) = match operands(Operator::Divide, left, right)? {
        Operands::Ints(a, b) => (a as f64, b as f64),
        Operands::Floats(a, b) => (a, b),
    };
    if b == 0.0 {
        return Err(division_by_zero());
    }
    Ok(Value::Float(a / b))
}

fn floor_divide(left: &Value, right: &Value) -> Result<Value> {
    match operands(Operator::FloorDivide, left, right)? {
        Operands::Ints(_, 0) => Err(division_by_zero()),
        Operands::Ints(a, b) => {
            let quotient = a
                .checked_div(b)
                .ok_or_else(|| overflow(Operator::FloorDivide))?;
            if a % b != 0 && ((a < 0) != (b < 0)) {
                Ok(Value::Int(quotient - 1))
            } else {
                Ok(Value::Int(quotient))
            }
        }
        Operands::Floats(_, b) if b == 0.0 => Err(division_by_zero()),
        Operands::Floats(a, b) => Ok(Value::Float(float_divmod(a, b).0)),
    }
}

fn modulo(left: &Value, right: &Value) -> Result<Value> {
    match operands(Operator::Modulo, left, right)? {
        Operands::Ints(_, 0) => Err(division_by_zero()),
        Operands::Ints(_, -1) => Ok(Value::Int(0)),
        Operands::Ints(a, b) => {
            let rem = a % b;
            if rem != 0 && ((rem < 0) != (b < 0)) {
                Ok(Value::Int(rem + b))
            } else {
                Ok(Value::Int(rem))
            }
        }
        Operands::Floats(_, b) if b == 0.0 => Err(division_by_zero()),
        Operands::Floats(a, b) => Ok(Value::Float(float_divmod(a, b).1)),
    }
}

fn power(left: &Value, right: &Value) -> Result<Value> {
    let (a, b) = match operands(Operator::Power, left, right)? {
        Operands::Ints(a, b) if b >= 0 => {
            let exponent = match (a, u32::try_from(b)) {
                (_, Ok(exponent)) => exponent,
                (0 | 1, Err(_)) => return Ok(Value::Int(a)),
                (-1, Err(_)) => return Ok(Value::Int(if b % 2 == 0 { 1 } else { -1 })),
                (_, Err(_)) => return Err(overflow(Operator::Power)),
            };
            return a
                .checked_pow(exponent)
                .map(Value::Int)
                .ok_or_else(|| overflow(Operator::Power));
        }
        Operands::Ints(a, b) => (a as f64, b as f64),
        Operands::Floats(a, b) => (a, b),
    };

    if a == 0.0 && b < 0.0 {
        return Err(division_by_zero());
    }
    if a < 0.0 && b.is_finite() && b.fract() != 0.0 {
        return Err(ArithmeticError::Domain("pow".to_string()).into());
    }
    let result = a.powf(b);
    if result.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(ArithmeticError::Range("pow".to_string()).into());
    }
    Ok(Value::Float(result))
}

fn bitwise(operator: Operator, left: &Value, right: &Value) -> Result<(i64, i64)> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok((*a, *b)),
        _ => Err(unsupported(operator, left, right)),
    }
}

fn bit_xor(left: &Value, right: &Value) -> Result<Value> {
    let (a, b) = bitwise(Operator::BitXor, left, right)?;
    Ok(Value::Int(a ^ b))
}

fn bit_or(left: &Value, right: &Value) -> Result<Value> {
    let (a, b) = bitwise(Operator::BitOr, left, right)?;
    Ok(Value::Int(a | b))
}

fn bit_and(left: &Value, right: &Value) -> Result<Value> {
    let (a, b) = bitwise(Operator::BitAnd, left, right)?;
    Ok(Value::Int(a & b))
}

fn negate(operand: &Value) -> Result<Value> {
    match operand {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| overflow(Operator::Negate)),
        Value::Float(x) => Ok(Value::Float(-x)),
        Value::Function(_) => Err(EvalError::UnsupportedUnaryOperand {
            operator: Operator::Negate.symbol(),
            operand: operand.type_name(),
        }),
    }
}

fn identity(operand: &Value) -> Result<Value> {
    match operand {
        Value::Int(_) | Value::Float(_) => Ok(operand.clone()),
        Value::Function(_) => Err(EvalError::UnsupportedUnaryOperand {
            operator: Operator::Identity.symbol(),
            operand: operand.type_name(),
        }),
    }
}
