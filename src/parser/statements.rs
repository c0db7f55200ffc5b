//! Statement parsing
//!
//! Dispatches on keyword prefixes, falling through to declaration and
//! expression statements. Statement bodies come in two shapes: a braced
//! `BlockStatement` or a single-statement `InlineStatement`; pending
//! comments are spliced into whichever list is open.

use crate::parser::ast::{DeclKind, Node, VarScope};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> Result<Node, ParseError> {
        if self.lookahead("if")? {
            let position = self.line_number;
            self.consume("(")?;
            let condition = match self.parse_expression(Some(")"))? {
                Some(condition) => Box::new(condition),
                None => return Err(self.unexpected("if condition")),
            };
            if self.lookahead("else")? {
                return Err(self.unexpected("if body statement"));
            }
            let body = Box::new(self.parse_body(false)?);
            let else_body = if self.lookahead("else")? {
                Some(Box::new(self.parse_body(false)?))
            } else {
                None
            };
            return Ok(Node::If { position, condition, body, else_body });
        }

        if self.lookahead("while")? {
            let position = self.line_number;
            self.consume("(")?;
            let condition = match self.parse_expression(Some(")"))? {
                Some(condition) => Box::new(condition),
                None => return Err(self.unexpected("while condition")),
            };
            let body = Box::new(self.parse_body(false)?);
            return Ok(Node::While { position, condition, body });
        }

        if self.lookahead("do")? {
            let position = self.line_number;
            let body = Box::new(self.parse_body(false)?);
            self.consume("while")?;
            self.consume("(")?;
            let condition = match self.parse_expression(Some(")"))? {
                Some(condition) => Box::new(condition),
                None => return Err(self.unexpected("while condition")),
            };
            self.consume(";")?;
            return Ok(Node::DoWhile { position, condition, body });
        }

        if self.lookahead("for")? {
            let position = self.line_number;
            self.consume("(")?;
            // The init is a full statement and consumes its own terminator.
            let mut init = self.parse_statement()?;
            if let Node::Variable { scope, .. } = &mut init {
                if *scope == VarScope::Local {
                    *scope = VarScope::For;
                }
            }
            let condition = self.parse_expression(Some(";"))?.map(Box::new);
            let step = self.parse_expression(Some(")"))?.map(Box::new);
            let body = Box::new(self.parse_body(false)?);
            return Ok(Node::For { position, init: Box::new(init), condition, step, body });
        }

        if self.lookahead("return")? {
            let position = self.line_number;
            let value = self.parse_expression(Some(";"))?.map(Box::new);
            return Ok(Node::Return { position, value });
        }

        if self.lookahead("break")? {
            let position = self.line_number;
            let label = self.parse_expression(Some(";"))?.map(Box::new);
            return Ok(Node::Break { position, label });
        }

        if self.lookahead("continue")? {
            let position = self.line_number;
            let label = self.parse_expression(Some(";"))?.map(Box::new);
            return Ok(Node::Continue { position, label });
        }

        if self.declaration_incoming()? {
            let declaration = self.parse_declaration(DeclKind::Declaration)?;
            return self.parse_definition(declaration, false);
        }

        let position = self.line_number;
        let expression = self.parse_expression(Some(";"))?.map(Box::new);
        Ok(Node::Expression { position, expression })
    }

    /// Parse a statement body: a braced block, or a single inline statement.
    /// Function bodies pass `should_be_block` to make the braces mandatory.
    pub(crate) fn parse_body(&mut self, should_be_block: bool) -> Result<Node, ParseError> {
        let mut body = Vec::new();
        if self.curr == Some('{') || should_be_block {
            let position = self.line_number;
            self.consume("{")?;
            self.flush_comments(&mut body);
            while let Some(c) = self.curr {
                if c == '}' {
                    break;
                }
                let statement = self.parse_statement()?;
                body.push(statement);
                self.flush_comments(&mut body);
            }
            self.consume("}")?;
            Ok(Node::Block { position, body })
        } else {
            let position = self.line_number;
            self.flush_comments(&mut body);
            if !self.lookahead(";")? {
                body.push(self.parse_statement()?);
            }
            Ok(Node::Inline { position, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Node;
    use crate::parser::parse::Parser;

    fn statement(source: &str) -> Node {
        let mut parser = Parser::new(source);
        parser.parse_statement().unwrap()
    }

    #[test]
    fn test_if_with_inline_bodies() {
        let node = statement("if (x) y = 1; else y = 2;");
        match node {
            Node::If { condition, body, else_body, .. } => {
                assert!(matches!(*condition, Node::Identifier(_)));
                assert!(matches!(*body, Node::Inline { .. }));
                assert!(matches!(else_body.as_deref(), Some(Node::Inline { .. })));
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else() {
        let node = statement("if (x) { y = 1; }");
        match node {
            Node::If { body, else_body, .. } => {
                assert!(matches!(*body, Node::Block { .. }));
                assert!(else_body.is_none());
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_if_with_empty_inline_body() {
        let node = statement("if (x); else z = 1;");
        match node {
            Node::If { body, else_body, .. } => {
                match *body {
                    Node::Inline { ref body, .. } => assert!(body.is_empty()),
                    ref other => panic!("expected inline body, got {:?}", other),
                }
                assert!(else_body.is_some());
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_else_without_body_is_an_error() {
        let mut parser = Parser::new("if (x) else y = 1;");
        let err = parser.parse_statement().unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect if body statement");
    }

    #[test]
    fn test_missing_if_condition_is_an_error() {
        let mut parser = Parser::new("if () y = 1;");
        let err = parser.parse_statement().unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect if condition");
    }

    #[test]
    fn test_while_statement() {
        let node = statement("while (n > 0) n = n - 1;");
        match node {
            Node::While { condition, body, .. } => {
                assert!(matches!(*condition, Node::Binary { .. }));
                assert!(matches!(*body, Node::Inline { .. }));
            }
            other => panic!("expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_do_while_statement() {
        let node = statement("do { n = n - 1; } while (n > 0);");
        match node {
            Node::DoWhile { condition, body, .. } => {
                assert!(matches!(*condition, Node::Binary { .. }));
                assert!(matches!(*body, Node::Block { .. }));
            }
            other => panic!("expected do-while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_for_renames_variable_init() {
        let node = statement("for (int i = 0; i < 10; i = i + 1) {}");
        match node {
            Node::For { init, condition, step, body, .. } => {
                assert_eq!(init.kind(), "ForVariableDefinition");
                assert!(matches!(condition.as_deref(), Some(Node::Binary { op: "<", .. })));
                assert!(matches!(step.as_deref(), Some(Node::Binary { op: "=", .. })));
                match *body {
                    Node::Block { ref body, .. } => assert!(body.is_empty()),
                    ref other => panic!("expected block body, got {:?}", other),
                }
            }
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_expression_init() {
        let node = statement("for (i = 0; i < 10; i = i + 1) {}");
        match node {
            Node::For { init, .. } => assert_eq!(init.kind(), "ExpressionStatement"),
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_return_with_and_without_value() {
        match statement("return x + 1;") {
            Node::Return { value, .. } => assert!(value.is_some()),
            other => panic!("expected return statement, got {:?}", other),
        }
        match statement("return;") {
            Node::Return { value, .. } => assert!(value.is_none()),
            other => panic!("expected return statement, got {:?}", other),
        }
    }

    #[test]
    fn test_break_and_continue() {
        match statement("break;") {
            Node::Break { label, .. } => assert!(label.is_none()),
            other => panic!("expected break statement, got {:?}", other),
        }
        match statement("continue;") {
            Node::Continue { label, .. } => assert!(label.is_none()),
            other => panic!("expected continue statement, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_prefix_identifiers_are_expressions() {
        // `iffy` must not dispatch to the if branch.
        let node = statement("iffy = 1;");
        match node {
            Node::Expression { expression, .. } => {
                assert!(matches!(expression.as_deref(), Some(Node::Binary { op: "=", .. })));
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_local_declaration_statement() {
        let node = statement("int x = 1;");
        assert_eq!(node.kind(), "VariableDefinition");
    }

    #[test]
    fn test_function_body_requires_block() {
        let mut parser = Parser::new("return 0;");
        let err = parser.parse_body(true).unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect {");
    }
}
