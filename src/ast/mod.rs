mod call_args;
mod evaluator;
mod operator;
mod parser;
mod resolver;
mod validator;
mod value;

pub use call_args::*;
pub use evaluator::*;
pub use operator::*;
pub use parser::ExpressionParser as Parser;
pub use resolver::*;
pub use validator::*;
pub use value::*;

/// Deepest expression tree the parser builds or the evaluator walks.
pub const MAX_EXPRESSION_DEPTH: usize = 200;

/// Parsed expression tree. Built once per evaluator and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Number),
    Identifier(String),
    BinaryOp {
        operator: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        operator: Operator,
        operand: Box<Expr>,
    },
    Attribute {
        base: Box<Expr>,
        attribute: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<(String, Expr)>,
    },
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Literal(Number::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Literal(Number::Float(value))
    }

    pub fn identifier(name: &str) -> Self {
        Expr::Identifier(name.to_string())
    }

    pub fn binary(operator: Operator, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: Operator, operand: Expr) -> Self {
        Expr::UnaryOp {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn attribute(base: Expr, attribute: &str) -> Self {
        Expr::Attribute {
            base: Box::new(base),
            attribute: attribute.to_string(),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
            keywords: Vec::new(),
        }
    }

    /// Number of nodes on the longest root-to-leaf path; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Identifier(_) => 1,
            Expr::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
            Expr::UnaryOp { operand, .. } => 1 + operand.depth(),
            Expr::Attribute { base, .. } => 1 + base.depth(),
            Expr::Call {
                callee,
                args,
                keywords,
            } => {
                let arguments = args
                    .iter()
                    .chain(keywords.iter().map(|(_, value)| value))
                    .map(Expr::depth)
                    .max()
                    .unwrap_or(0);
                1 + callee.depth().max(arguments)
            }
        }
    }

    /// Collects every identifier in the tree, in first-seen order. Attribute
    /// names and keyword names are not identifiers.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Identifier(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
            Expr::BinaryOp { left, right, .. } => {
                left.collect_identifiers(names);
                right.collect_identifiers(names);
            }
            Expr::UnaryOp { operand, .. } => operand.collect_identifiers(names),
            Expr::Attribute { base, .. } => base.collect_identifiers(names),
            Expr::Call {
                callee,
                args,
                keywords,
            } => {
                callee.collect_identifiers(names);
                for arg in args {
                    arg.collect_identifiers(names);
                }
                for (_, value) in keywords {
                    value.collect_identifiers(names);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_in_order_without_duplicates() {
        let ast = Parser::parse_expression("cos(theta) * r + theta.real").unwrap();
        assert_eq!(ast.identifiers(), vec!["cos", "theta", "r"]);
    }

    #[test]
    fn test_literal_has_no_identifiers() {
        assert!(Expr::int(881).identifiers().is_empty());
    }

    #[test]
    fn test_depth() {
        assert_eq!(Expr::int(1).depth(), 1);
        let ast = Parser::parse_expression("-(a + b) * f(c, d.real)").unwrap();
        assert_eq!(ast.depth(), 4);
    }
}
