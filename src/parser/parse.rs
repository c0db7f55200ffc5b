//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the error type and the
//! top-level parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser owns the character buffer and lexes directly off it while it
//! parses; there is no intermediate token stream. Its methods are split
//! across multiple files using `impl Parser` blocks, allowing each module to
//! extend the Parser with related functionality while sharing the scanner
//! state:
//! - `scanner`: cursor primitives, lookahead/consume, comment capture
//! - `lexer`: identifier, number, string and escape lexing
//! - `declarations`: declaration recognition, definitions, functions
//! - `expressions`: precedence-climbing expression parsing
//! - `statements`: statement dispatch and bodies
//!
//! The driver here loops over top-level forms: `#include`, `#define`,
//! `typedef`, global declarations/definitions and functions.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::parser::ast::{DeclKind, Node, Program};
use crate::parser::expressions::precedence_table;

/// Parse failure. Parsing stops at the first violation; there is no
/// recovery and no diagnostic collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Line number {line}: Expect {expected}")]
    Unexpected { line: usize, expected: String },
    #[error("{construct} is not supported")]
    Unsupported { construct: &'static str },
}

/// Recursive descent parser with integrated lexing for a restricted C
/// dialect.
///
/// A parser owns its source buffer (which it may rewrite in place while
/// handling declaration lists) and the mutable type-name table grown by
/// `typedef`, so one instance parses one input. Independent parsers are
/// free to run in parallel on independent inputs.
pub struct Parser {
    /// Source text; rewritten in place for multi-identifier declarations.
    pub(crate) source: Vec<char>,
    /// Offset of the current character.
    pub(crate) index: usize,
    /// Character at `index`, `None` past end of input.
    pub(crate) curr: Option<char>,
    /// 1-based line of the current character.
    pub(crate) line_number: usize,
    /// Comments crossed by the scanner, pending their flush into the
    /// nearest enclosing statement list.
    pub(crate) comments: Vec<Node>,
    /// Reserved type base names; `typedef` appends to this during the parse.
    pub(crate) type_names: Vec<String>,
    /// Binding strength per binary operator.
    pub(crate) precedence: FxHashMap<&'static str, i32>,
    /// Characters accepted after `\` in escape sequences.
    pub(crate) escapes: FxHashSet<char>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let source: Vec<char> = source.chars().collect();
        let curr = source.first().copied();
        Self {
            source,
            index: 0,
            curr,
            line_number: 1,
            comments: Vec::new(),
            type_names: ["void", "char", "int", "float", "double"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            precedence: precedence_table(),
            escapes: ['a', 'b', 'f', 'n', 'r', 't', 'v', '\\', '\'', '"', '?']
                .into_iter()
                .collect(),
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Unexpected { line: self.line_number, expected: expected.to_string() }
    }

    /// Parse the entire program.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        // Prime the scanner: skip any leading whitespace and comments.
        self.skip_trivia(false, false)?;
        let mut body = Vec::new();
        while self.curr.is_some() {
            self.skip_spaces()?;
            self.flush_comments(&mut body);
            if self.lookahead("#include")? {
                let statement = self.parse_include()?;
                body.push(statement);
            } else if self.lookahead("#define")? {
                let statement = self.parse_predefine()?;
                body.push(statement);
            } else if self.declaration_incoming()? {
                let declaration = self.parse_declaration(DeclKind::Declaration)?;
                let statement = if self.lookahead("(")? {
                    self.parse_function(declaration)?
                } else {
                    self.parse_definition(declaration, true)?
                };
                body.push(statement);
            } else if self.lookahead("typedef")? {
                let declaration = self.parse_declaration(DeclKind::TypeDefinition)?;
                self.type_names.push(declaration.identifier.name.clone());
                self.consume(";")?;
                body.push(Node::Declaration(declaration));
            } else if self.lookahead("struct")? {
                return Err(ParseError::Unsupported { construct: "struct" });
            } else if self.lookahead("enum")? {
                return Err(ParseError::Unsupported { construct: "enum" });
            } else {
                return Err(self.unexpected("definition"));
            }
            self.flush_comments(&mut body);
            self.skip_spaces()?;
        }
        self.flush_comments(&mut body);
        Ok(Program { body })
    }

    /// Parse the target of an `#include`, preserving its delimiters.
    fn parse_include(&mut self) -> Result<Node, ParseError> {
        let position = self.line_number;
        let mut file = String::new();
        match self.curr {
            Some('<') => {
                while let Some(c) = self.curr {
                    if c == '>' {
                        break;
                    }
                    file.push(c);
                    self.advance(true, false)?;
                }
            }
            Some('"') => loop {
                let Some(c) = self.curr else {
                    break;
                };
                file.push(c);
                self.advance(true, false)?;
                if self.curr.is_none() || self.curr == Some('"') {
                    break;
                }
            },
            _ => return Err(self.unexpected("\" or <")),
        }
        match self.curr {
            Some(c) => {
                file.push(c);
                self.advance(true, false)?;
            }
            None => {
                let closer = if file.starts_with('<') { ">" } else { "\"" };
                return Err(self.unexpected(closer));
            }
        }
        Ok(Node::Include { position, file })
    }

    /// Parse a `#define`: an identifier, an optional parenthesized argument
    /// list, and a value expression. The value has no terminator; scanning
    /// simply stops where no expression continues.
    fn parse_predefine(&mut self) -> Result<Node, ParseError> {
        let position = self.line_number;
        let identifier = self.parse_identifier(false)?;
        let mut arguments = None;
        if self.lookahead("(")? {
            let mut entries = Vec::new();
            while self.curr.is_some() {
                entries.push(self.parse_expression(None)?);
                if !self.lookahead(",")? {
                    break;
                }
            }
            self.consume(")")?;
            arguments = Some(entries);
        }
        // A function-like macro's value must itself be parenthesized.
        if arguments.is_some() && self.curr != Some('(') {
            return Err(self.unexpected("("));
        }
        let value = self.parse_expression(None)?.map(Box::new);
        Ok(Node::Predefine { position, identifier, arguments, value })
    }
}
