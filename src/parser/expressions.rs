//! Expression parsing with precedence climbing
//!
//! A unary parser (literal plus postfix index/call/paren forms) feeds a
//! table-driven binary parser. [`Parser::parse_binary`] recurses only while
//! the next operator binds strictly tighter than the current one, which
//! leaves every operator left-associative.
//!
//! Expressions are allowed to be empty: `parse_literal` returns `None` when
//! nothing expression-like starts at the cursor, and that `None` propagates
//! up so callers can treat `;` or `)` as an absent clause. The binary parser
//! stops at `,` and `)` only because neither appears in [`OPERATORS`].

use crate::parser::ast::Node;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::scanner::{is_float_char, is_identifier_start};

use rustc_hash::FxHashMap;

/// Binary operator lexemes, ordered so that the longest match wins: a lexeme
/// must precede any of its own prefixes.
pub(crate) const OPERATORS: &[&str] = &[
    "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "+", "-", "*", "/", "%", "<", ">", "&", "|",
    "^", "=",
];

/// Binding strength per operator; higher binds tighter.
pub(crate) fn precedence_table() -> FxHashMap<&'static str, i32> {
    let mut table = FxHashMap::default();
    for (op, level) in [
        ("=", 1),
        ("||", 2),
        ("&&", 3),
        ("|", 4),
        ("^", 5),
        ("&", 6),
        ("==", 7),
        ("!=", 7),
        ("<", 8),
        ("<=", 8),
        (">", 8),
        (">=", 8),
        ("<<", 9),
        (">>", 9),
        ("+", 10),
        ("-", 10),
        ("*", 11),
        ("/", 11),
        ("%", 11),
    ] {
        table.insert(op, level);
    }
    table
}

impl Parser {
    /// Parse a full expression, then consume `end` if one is given.
    /// The result is `None` when no expression starts at the cursor.
    pub(crate) fn parse_expression(&mut self, end: Option<&str>) -> Result<Option<Node>, ParseError> {
        let unary = self.parse_unary()?;
        let expression = self.parse_binary(unary, 0)?;
        if let Some(end) = end {
            self.consume(end)?;
        }
        Ok(expression)
    }

    /// Identify the binary operator at the cursor without committing to it.
    pub(crate) fn scan_binary_operator(&mut self) -> Result<Option<&'static str>, ParseError> {
        let state = self.save();
        for op in OPERATORS {
            if self.lookahead(op)? {
                self.restore(state);
                return Ok(Some(op));
            }
        }
        Ok(None)
    }

    /// Precedence climbing over `left`, folding in operators of at least
    /// `min_precedence`.
    pub(crate) fn parse_binary(
        &mut self,
        mut left: Option<Node>,
        min_precedence: i32,
    ) -> Result<Option<Node>, ParseError> {
        let mut ahead = self.scan_binary_operator()?;
        while let Some(op) = ahead {
            if self.precedence[op] < min_precedence {
                break;
            }
            let position = self.line_number;
            self.consume(op)?;
            let mut right = match self.parse_unary()? {
                Some(right) => right,
                None => return Err(self.unexpected("right value")),
            };
            ahead = self.scan_binary_operator()?;

            // Extend the right side while the next operator binds tighter.
            while let Some(next) = ahead {
                if self.precedence[next] <= self.precedence[op] {
                    break;
                }
                right = match self.parse_binary(Some(right), self.precedence[next])? {
                    Some(right) => right,
                    None => return Err(self.unexpected("right value")),
                };
                ahead = self.scan_binary_operator()?;
            }

            left = Some(Node::Binary {
                position,
                left: left.map(Box::new),
                right: Box::new(right),
                op,
            });
        }
        Ok(left)
    }

    /// Parse a literal with its postfix forms: index chains, call argument
    /// lists and parenthesized sub-expressions.
    pub(crate) fn parse_unary(&mut self) -> Result<Option<Node>, ParseError> {
        let literal = self.parse_literal()?;

        let mut indexes: Vec<Option<Node>> = Vec::new();
        while self.lookahead("[")? {
            indexes.push(self.parse_expression(None)?);
            self.consume("]")?;
        }
        if !indexes.is_empty() {
            return Ok(Some(Node::Index {
                position: self.line_number,
                array: literal.map(Box::new),
                indexes,
            }));
        }

        if self.lookahead("(")? {
            if let Some(callee) = literal {
                let position = self.line_number;
                let mut arguments = Vec::new();
                while self.curr.is_some() {
                    arguments.push(self.parse_expression(None)?);
                    if !self.lookahead(",")? {
                        break;
                    }
                }
                self.consume(")")?;
                return Ok(Some(Node::Call { position, callee: Box::new(callee), arguments }));
            }
            // No left value: the parenthesis opens the expression itself.
            let position = self.line_number;
            let expression = self.parse_expression(None)?;
            self.consume(")")?;
            return Ok(Some(Node::Parentheses { position, expression: expression.map(Box::new) }));
        }

        Ok(literal)
    }

    /// Parse a literal value, or `None` when the cursor does not start one.
    pub(crate) fn parse_literal(&mut self) -> Result<Option<Node>, ParseError> {
        if self.lookahead("{")? {
            let position = self.line_number;
            let mut entries = Vec::new();
            while self.curr.is_some() {
                entries.push(self.parse_expression(None)?);
                if !self.lookahead(",")? {
                    break;
                }
            }
            self.consume("}")?;
            return Ok(Some(Node::ArrayLiteral { position, value: entries }));
        }

        match self.curr {
            Some('\'') => {
                self.advance(true, true)?;
                let position = self.line_number;
                let value = if self.curr == Some('\\') {
                    self.parse_escape()?
                } else {
                    let mut value = String::new();
                    if let Some(c) = self.curr {
                        value.push(c);
                    }
                    self.advance(true, true)?;
                    value
                };
                self.consume("'")?;
                Ok(Some(Node::CharLiteral { position, value }))
            }
            Some('"') => {
                let position = self.line_number;
                let value = self.parse_string(false)?;
                Ok(Some(Node::StringLiteral { position, value }))
            }
            _ => {
                if self.lookahead("0x")? {
                    return Ok(Some(self.parse_number(16)?));
                }
                if self.lookahead("-0x")? {
                    let mut number = self.parse_number(16)?;
                    if let Node::Number { value, .. } = &mut number {
                        value.insert(0, '-');
                    }
                    return Ok(Some(number));
                }
                match self.curr {
                    Some(c) if is_float_char(c) || c == '-' => Ok(Some(self.parse_number(10)?)),
                    Some(c) if is_identifier_start(c) => {
                        let identifier = self.parse_identifier(false)?;
                        Ok(Some(Node::Identifier(identifier)))
                    }
                    _ => Ok(None),
                }
            }
        }
    }
}
