use crate::ast::{Expr, Number, Operator, MAX_EXPRESSION_DEPTH};
use crate::error::{EvalError, Result};
use log::{debug, trace};
use pest::error::{Error as PestError, ErrorVariant, InputLocation};
use pest::iterators::{Pair, Pairs};
use pest::{Parser, Position};
use pest_derive::Parser;
use std::collections::HashSet;

/// Deepest parenthesis nesting accepted, call parentheses included.
pub const MAX_PAREN_DEPTH: usize = 32;

#[derive(Parser)]
#[grammar = "ast/expression.pest"]
pub struct ExpressionParser;

fn syntax_error(message: impl Into<String>) -> EvalError {
    EvalError::SyntaxError(message.into())
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, expected: &str) -> Result<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| syntax_error(format!("expected {}", expected)))
}

fn rule_name(rule: &Rule) -> String {
    let name = match rule {
        Rule::number => "number",
        Rule::identifier => "identifier",
        Rule::EOI => "end of input",
        Rule::bit_or | Rule::positional_argument => "expression",
        Rule::factor | Rule::power | Rule::postfix => "operand",
        Rule::UNARY => "sign",
        Rule::keyword_argument => "keyword argument",
        Rule::BIT_OR => "'|'",
        Rule::BIT_XOR => "'^'",
        Rule::BIT_AND => "'&'",
        Rule::PLUS => "'+'",
        Rule::MINUS => "'-'",
        Rule::POW => "'**'",
        Rule::STAR => "'*'",
        Rule::DOUBLE_SLASH => "'//'",
        Rule::SLASH => "'/'",
        Rule::MOD => "'%'",
        Rule::call_suffix | Rule::group => "'('",
        Rule::attribute_suffix => "'.'",
        other => return format!("{:?}", other),
    };
    name.to_string()
}

/// Renders a pest error, listing each expected token once.
fn describe_error(input: &str, error: PestError<Rule>) -> EvalError {
    if let (ErrorVariant::ParsingError { positives, negatives }, InputLocation::Pos(offset)) =
        (&error.variant, &error.location)
    {
        let mut seen = HashSet::new();
        let positives: Vec<Rule> = positives
            .iter()
            .copied()
            .filter(|rule| seen.insert(rule_name(rule)))
            .collect();
        if let Some(position) = Position::new(input, *offset) {
            let variant = ErrorVariant::ParsingError {
                positives,
                negatives: negatives.clone(),
            };
            let error = PestError::new_from_pos(variant, position);
            return syntax_error(error.renamed_rules(rule_name).to_string());
        }
    }
    syntax_error(error.renamed_rules(rule_name).to_string())
}

/// Rejects parenthesis nesting the recursive descent cannot handle safely.
fn check_paren_depth(input: &str) -> Result<()> {
    let mut depth = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_PAREN_DEPTH {
                    return Err(syntax_error(format!(
                        "too many nested parentheses (limit {})",
                        MAX_PAREN_DEPTH
                    )));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Fails once a node grows past the evaluable depth.
fn check_depth(node: Expr) -> Result<Expr> {
    if node.depth() > MAX_EXPRESSION_DEPTH {
        return Err(syntax_error(format!(
            "expression is nested too deeply (limit {})",
            MAX_EXPRESSION_DEPTH
        )));
    }
    Ok(node)
}

impl ExpressionParser {
    /// Parses source text into an expression tree.
    pub fn parse_expression(input: &str) -> Result<Expr> {
        debug!("Parsing expression: {}", input);
        check_paren_depth(input)?;
        let mut pairs = ExpressionParser::parse(Rule::expression, input)
            .map_err(|e| describe_error(input, e))?;

        let expression = next_pair(&mut pairs, "expression")?;
        let mut inner = expression.into_inner();
        let ast = Self::build_node(next_pair(&mut inner, "expression")?)?;
        debug!("Parse result: {:?}", ast);
        Ok(ast)
    }

    fn build_node(pair: Pair<Rule>) -> Result<Expr> {
        trace!("Building node: {:?}", pair.as_rule());
        match pair.as_rule() {
            Rule::bit_or | Rule::bit_xor | Rule::bit_and | Rule::sum | Rule::term => {
                Self::build_left_associative(pair)
            }
            Rule::factor => Self::build_factor(pair),
            Rule::power => Self::build_power(pair),
            Rule::postfix => Self::build_postfix(pair),
            Rule::group | Rule::positional_argument => {
                let mut inner = pair.into_inner();
                Self::build_node(next_pair(&mut inner, "expression")?)
            }
            Rule::number => Self::build_number(pair),
            Rule::identifier => Ok(Expr::Identifier(pair.as_str().to_string())),
            other => Err(syntax_error(format!("unexpected rule: {:?}", other))),
        }
    }

    fn build_left_associative(pair: Pair<Rule>) -> Result<Expr> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_node(next_pair(&mut pairs, "operand")?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = Operator::try_from(operator_pair.as_str()).map_err(syntax_error)?;
            let right = Self::build_node(next_pair(&mut pairs, "operand")?)?;
            node = check_depth(Expr::binary(operator, node, right))?;
        }

        Ok(node)
    }

    /// Wraps `operand` in the signs written before it, innermost last.
    fn apply_signs(signs: Vec<Operator>, operand: Expr) -> Result<Expr> {
        signs
            .into_iter()
            .rev()
            .try_fold(operand, |node, sign| check_depth(Expr::unary(sign, node)))
    }

    fn build_factor(pair: Pair<Rule>) -> Result<Expr> {
        let mut signs = Vec::new();
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::UNARY => signs.push(Operator::unary(inner.as_str()).map_err(syntax_error)?),
                _ => return Self::apply_signs(signs, Self::build_node(inner)?),
            }
        }
        Err(syntax_error("expected operand"))
    }

    fn build_power(pair: Pair<Rule>) -> Result<Expr> {
        let mut pairs = pair.into_inner();
        let base = Self::build_node(next_pair(&mut pairs, "operand")?)?;

        // Each exponent keeps the signs written in front of it.
        let mut exponents = Vec::new();
        let mut signs = Vec::new();
        for inner in pairs {
            match inner.as_rule() {
                Rule::POW => {}
                Rule::UNARY => signs.push(Operator::unary(inner.as_str()).map_err(syntax_error)?),
                _ => exponents.push((std::mem::take(&mut signs), Self::build_node(inner)?)),
            }
        }

        // Right-associative: fold from the last exponent back to the base.
        let mut exponents = exponents.into_iter().rev();
        let Some((signs, last)) = exponents.next() else {
            return Ok(base);
        };
        let mut exponent = Self::apply_signs(signs, last)?;
        for (signs, operand) in exponents {
            let raised = check_depth(Expr::binary(Operator::Power, operand, exponent))?;
            exponent = Self::apply_signs(signs, raised)?;
        }
        check_depth(Expr::binary(Operator::Power, base, exponent))
    }

    fn build_postfix(pair: Pair<Rule>) -> Result<Expr> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_node(next_pair(&mut pairs, "operand")?)?;

        for suffix in pairs {
            node = match suffix.as_rule() {
                Rule::attribute_suffix => {
                    let mut inner = suffix.into_inner();
                    let attribute = next_pair(&mut inner, "attribute name")?;
                    Expr::attribute(node, attribute.as_str())
                }
                Rule::call_suffix => Self::build_call(node, suffix)?,
                other => return Err(syntax_error(format!("unexpected suffix: {:?}", other))),
            };
            node = check_depth(node)?;
        }

        Ok(node)
    }

    fn build_call(callee: Expr, pair: Pair<Rule>) -> Result<Expr> {
        let mut args = Vec::new();
        let mut keywords: Vec<(String, Expr)> = Vec::new();

        for argument in pair.into_inner() {
            match argument.as_rule() {
                Rule::positional_argument => {
                    if !keywords.is_empty() {
                        return Err(syntax_error("positional argument follows keyword argument"));
                    }
                    args.push(Self::build_node(argument)?);
                }
                Rule::keyword_argument => {
                    let mut inner = argument.into_inner();
                    let name = next_pair(&mut inner, "keyword")?.as_str().to_string();
                    if keywords.iter().any(|(existing, _)| *existing == name) {
                        return Err(syntax_error(format!("keyword argument repeated: {}", name)));
                    }
                    let value = Self::build_node(next_pair(&mut inner, "keyword value")?)?;
                    keywords.push((name, value));
                }
                other => return Err(syntax_error(format!("unexpected argument: {:?}", other))),
            }
        }

        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            keywords,
        })
    }

    fn build_number(pair: Pair<Rule>) -> Result<Expr> {
        let text = pair.as_str();
        let number = if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
            text.parse::<f64>()
                .map(Number::Float)
                .map_err(|e| syntax_error(format!("invalid number '{}': {}", text, e)))?
        } else {
            text.parse::<i64>()
                .map(Number::Int)
                .map_err(|e| syntax_error(format!("invalid integer '{}': {}", text, e)))?
        };
        Ok(Expr::Literal(number))
    }
}
