//! Declaration, definition and function parsing
//!
//! Whether upcoming tokens start a declaration is decided by probing two
//! tables: the fixed modifier words below and the parser's growing
//! `type_names` list (seeded with the built-in base types, extended by every
//! `typedef`). A modifier with no following type name is itself promoted to
//! the type name, so `unsigned x;` declares `x` of type `unsigned`.
//!
//! Declaration lists (`int a, b;`) are handled by rewriting the source
//! buffer in place: when a `,` follows a finished declarator, the comma is
//! replaced with the spelled-out type so the driver re-enters this parser at
//! the next identifier as if it were a fresh declaration.

use crate::parser::ast::{DeclKind, Declaration, Node, TypeNode, VarScope};
use crate::parser::parse::{ParseError, Parser};

/// Reserved modifier words recognized before a type name.
pub(crate) const TYPE_MODIFIERS: &[&str] = &[
    "unsigned", "signed", "short", "long", "const", "static", "extern", "register", "auto",
    "volatile",
];

impl Parser {
    /// Non-committing probe: does a modifier or type name start here?
    pub(crate) fn declaration_incoming(&mut self) -> Result<bool, ParseError> {
        let state = self.save();
        for modifier in TYPE_MODIFIERS {
            if self.lookahead(modifier)? {
                self.restore(state);
                return Ok(true);
            }
        }
        for i in 0..self.type_names.len() {
            let name = self.type_names[i].clone();
            if self.lookahead(&name)? {
                self.restore(state);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Parse modifiers, a type name and an identifier.
    pub(crate) fn parse_declaration(&mut self, kind: DeclKind) -> Result<Declaration, ParseError> {
        let type_position = self.line_number;
        let mut modifiers: Vec<String> = Vec::new();
        loop {
            let mut matched = false;
            for modifier in TYPE_MODIFIERS {
                if self.lookahead(modifier)? {
                    modifiers.push((*modifier).to_string());
                    matched = true;
                }
            }
            if !matched {
                break;
            }
        }

        for i in 0..self.type_names.len() {
            let name = self.type_names[i].clone();
            if self.lookahead(&name)? {
                let decl_type = TypeNode { position: type_position, name, modifiers };
                let position = self.line_number;
                let identifier = self.parse_identifier(false)?;
                return Ok(Declaration { position, kind, identifier, decl_type });
            }
        }

        // No type name, but at least one modifier: the last modifier serves
        // as the type name (unsigned x; means unsigned int x;).
        if let Some(name) = modifiers.pop() {
            let decl_type = TypeNode { position: type_position, name, modifiers };
            let position = self.line_number;
            let identifier = self.parse_identifier(false)?;
            return Ok(Declaration { position, kind, identifier, decl_type });
        }

        Err(self.unexpected("correct type name"))
    }

    /// Continue a declaration into a variable or array declarator, with an
    /// optional initializer.
    pub(crate) fn parse_definition(
        &mut self,
        declaration: Declaration,
        is_global: bool,
    ) -> Result<Node, ParseError> {
        let mut length: Vec<Option<Node>> = Vec::new();
        let mut is_array = false;
        while self.lookahead("[")? {
            is_array = true;
            if !self.lookahead("]")? {
                length.push(self.parse_expression(None)?);
                self.consume("]")?;
            } else {
                length.push(None);
            }
        }

        let defined = self.lookahead("=")?;
        let value = if defined { self.parse_expression(None)?.map(Box::new) } else { None };

        let Declaration { position, identifier, decl_type, .. } = declaration;

        if self.curr == Some(',') {
            // The declaration list continues: overwrite the comma with the
            // spelled-out type so the next identifier re-enters declaration
            // parsing (int a, b; reads as int a int b;).
            let mut spelled = String::new();
            for modifier in &decl_type.modifiers {
                spelled.push_str(modifier);
                spelled.push(' ');
            }
            spelled.push_str(&decl_type.name);
            self.source.splice(self.index..self.index + 1, spelled.chars());
            self.curr = self.source.get(self.index).copied();
        } else {
            self.consume(";")?;
        }

        if is_array {
            Ok(Node::Array {
                position,
                global: is_global,
                defined,
                identifier,
                var_type: decl_type,
                length,
                value,
            })
        } else {
            let scope = if is_global { VarScope::Global } else { VarScope::Local };
            Ok(Node::Variable { position, scope, defined, identifier, var_type: decl_type, value })
        }
    }

    /// Continue a declaration into a function prototype or definition; the
    /// opening parenthesis has already been consumed.
    pub(crate) fn parse_function(&mut self, declaration: Declaration) -> Result<Node, ParseError> {
        let parameters = self.parse_parameters()?;
        let Declaration { position, identifier, decl_type, .. } = declaration;
        if self.lookahead(";")? {
            Ok(Node::Function {
                position,
                identifier,
                return_type: decl_type,
                parameters,
                body: None,
            })
        } else {
            let body = self.parse_body(true)?;
            Ok(Node::Function {
                position,
                identifier,
                return_type: decl_type,
                parameters,
                body: Some(Box::new(body)),
            })
        }
    }

    /// Parse a comma-separated parameter list up to and including `)`.
    pub(crate) fn parse_parameters(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut parameters = Vec::new();
        while self.declaration_incoming()? {
            parameters.push(self.parse_declaration(DeclKind::ParameterDeclaration)?);
            if self.lookahead(")")? {
                return Ok(parameters);
            }
            self.consume(",")?;
        }
        self.consume(")")?;
        Ok(parameters)
    }
}
