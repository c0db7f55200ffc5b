// AST (Abstract Syntax Tree) definitions for the C dialect parser

use serde_json::{Map, Value};

/// Scope prefix applied to variable declarations and definitions.
///
/// `Global` variables appear only at the top level of a [`Program`]; `For`
/// variables appear only as the init statement of a `ForStatement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarScope {
    Local,
    Global,
    For,
}

/// Kind tag shared by the declaration-shaped nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Declaration,
    ParameterDeclaration,
    TypeDefinition,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Declaration => "Declaration",
            DeclKind::ParameterDeclaration => "ParameterDeclaration",
            DeclKind::TypeDefinition => "TypeDefinition",
        }
    }
}

/// Numeric base of a number literal, before `Long`/`Unsigned` prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Decimal,
    Hex,
    Octal,
    Float,
}

impl NumberBase {
    pub fn kind_str(&self) -> &'static str {
        match self {
            NumberBase::Decimal => "NumberLiteral",
            NumberBase::Hex => "HexNumberLiteral",
            NumberBase::Octal => "OctNumberLiteral",
            NumberBase::Float => "FloatNumberLiteral",
        }
    }
}

/// A named identifier with the line it was parsed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub position: usize,
    pub name: String,
}

impl Ident {
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("kind".into(), Value::from("Identifier"));
        object.insert("position".into(), Value::from(self.position as u64));
        object.insert("name".into(), Value::from(self.name.as_str()));
        Value::Object(object)
    }
}

/// A base type name plus the modifier words that preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub position: usize,
    pub name: String,
    pub modifiers: Vec<String>,
}

impl TypeNode {
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("kind".into(), Value::from("Type"));
        object.insert("position".into(), Value::from(self.position as u64));
        object.insert("name".into(), Value::from(self.name.as_str()));
        object.insert(
            "modifiers".into(),
            Value::Array(self.modifiers.iter().map(|m| Value::from(m.as_str())).collect()),
        );
        Value::Object(object)
    }
}

/// A type bound to an identifier: plain declarations, function parameters
/// and `typedef`s share this shape and differ only in [`DeclKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub position: usize,
    pub kind: DeclKind,
    pub identifier: Ident,
    pub decl_type: TypeNode,
}

impl Declaration {
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("kind".into(), Value::from(self.kind.as_str()));
        object.insert("position".into(), Value::from(self.position as u64));
        object.insert("identifier".into(), self.identifier.to_json());
        object.insert("type".into(), self.decl_type.to_json());
        Value::Object(object)
    }
}

/// AST nodes representing statements, expressions and comments.
///
/// Kind-string prefixes of the serialized form (`Global`, `For`, `Long`,
/// `Unsigned`) are modeled as typed fields and composed by [`Node::kind`].
/// Attributes the grammar allows to be absent (the left side of a binary
/// expression, entries of argument lists, loop clauses) are `Option`s and
/// serialize as JSON nulls.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Include {
        position: usize,
        /// Raw file reference including its `<>` or `""` delimiters.
        file: String,
    },
    Predefine {
        position: usize,
        identifier: Ident,
        /// `None` when the macro has no parameter list at all.
        arguments: Option<Vec<Option<Node>>>,
        value: Option<Box<Node>>,
    },
    Declaration(Declaration),
    Variable {
        position: usize,
        scope: VarScope,
        /// Definitions carry a value, declarations only bind a type.
        defined: bool,
        identifier: Ident,
        var_type: TypeNode,
        value: Option<Box<Node>>,
    },
    Array {
        position: usize,
        global: bool,
        defined: bool,
        identifier: Ident,
        var_type: TypeNode,
        /// One entry per dimension; `None` for an inferred `[]` dimension.
        length: Vec<Option<Node>>,
        value: Option<Box<Node>>,
    },
    Function {
        position: usize,
        identifier: Ident,
        return_type: TypeNode,
        parameters: Vec<Declaration>,
        /// `Some` for definitions, `None` for prototype declarations.
        body: Option<Box<Node>>,
    },
    Block {
        position: usize,
        body: Vec<Node>,
    },
    Inline {
        position: usize,
        body: Vec<Node>,
    },
    If {
        position: usize,
        condition: Box<Node>,
        body: Box<Node>,
        else_body: Option<Box<Node>>,
    },
    While {
        position: usize,
        condition: Box<Node>,
        body: Box<Node>,
    },
    DoWhile {
        position: usize,
        condition: Box<Node>,
        body: Box<Node>,
    },
    For {
        position: usize,
        init: Box<Node>,
        condition: Option<Box<Node>>,
        step: Option<Box<Node>>,
        body: Box<Node>,
    },
    Return {
        position: usize,
        value: Option<Box<Node>>,
    },
    Break {
        position: usize,
        label: Option<Box<Node>>,
    },
    Continue {
        position: usize,
        label: Option<Box<Node>>,
    },
    Expression {
        position: usize,
        expression: Option<Box<Node>>,
    },
    Binary {
        position: usize,
        left: Option<Box<Node>>,
        right: Box<Node>,
        op: &'static str,
    },
    Index {
        position: usize,
        array: Option<Box<Node>>,
        indexes: Vec<Option<Node>>,
    },
    Call {
        position: usize,
        callee: Box<Node>,
        arguments: Vec<Option<Node>>,
    },
    Parentheses {
        position: usize,
        expression: Option<Box<Node>>,
    },
    ArrayLiteral {
        position: usize,
        value: Vec<Option<Node>>,
    },
    CharLiteral {
        position: usize,
        /// Single raw character, or the escape in source form (`\n`).
        value: String,
    },
    StringLiteral {
        position: usize,
        value: String,
    },
    Number {
        position: usize,
        /// Textual form including sign, `0x` prefix and suffix letters.
        value: String,
        base: NumberBase,
        long_suffix: bool,
        unsigned_suffix: bool,
    },
    BlockComment {
        position: usize,
        content: String,
    },
    InlineComment {
        position: usize,
        content: String,
    },
    Identifier(Ident),
}

impl Node {
    /// Compose the serialized kind discriminator for this node.
    pub fn kind(&self) -> String {
        match self {
            Node::Include { .. } => "IncludeStatement".into(),
            Node::Predefine { .. } => "PredefineStatement".into(),
            Node::Declaration(declaration) => declaration.kind.as_str().into(),
            Node::Variable { scope, defined, .. } => {
                let prefix = match scope {
                    VarScope::Local => "",
                    VarScope::Global => "Global",
                    VarScope::For => "For",
                };
                let suffix = if *defined { "Definition" } else { "Declaration" };
                format!("{}Variable{}", prefix, suffix)
            }
            Node::Array { global, defined, .. } => {
                let prefix = if *global { "Global" } else { "" };
                let suffix = if *defined { "Definition" } else { "Declaration" };
                format!("{}Array{}", prefix, suffix)
            }
            Node::Function { body, .. } => {
                if body.is_some() {
                    "FunctionDefinition".into()
                } else {
                    "FunctionDeclaration".into()
                }
            }
            Node::Block { .. } => "BlockStatement".into(),
            Node::Inline { .. } => "InlineStatement".into(),
            Node::If { .. } => "IfStatement".into(),
            Node::While { .. } => "WhileStatement".into(),
            Node::DoWhile { .. } => "DoWhileStatement".into(),
            Node::For { .. } => "ForStatement".into(),
            Node::Return { .. } => "ReturnStatement".into(),
            Node::Break { .. } => "BreakStatement".into(),
            Node::Continue { .. } => "ContinueStatement".into(),
            Node::Expression { .. } => "ExpressionStatement".into(),
            Node::Binary { .. } => "BinaryExpression".into(),
            Node::Index { .. } => "IndexExpression".into(),
            Node::Call { .. } => "CallExpression".into(),
            Node::Parentheses { .. } => "ParenthesesExpression".into(),
            Node::ArrayLiteral { .. } => "ArrayLiteral".into(),
            Node::CharLiteral { .. } => "CharLiteral".into(),
            Node::StringLiteral { .. } => "StringLiteral".into(),
            Node::Number { base, long_suffix, unsigned_suffix, .. } => {
                let mut kind = String::new();
                if *unsigned_suffix {
                    kind.push_str("Unsigned");
                }
                if *long_suffix {
                    kind.push_str("Long");
                }
                kind.push_str(base.kind_str());
                kind
            }
            Node::BlockComment { .. } => "BlockComment".into(),
            Node::InlineComment { .. } => "InlineComment".into(),
            Node::Identifier(_) => "Identifier".into(),
        }
    }

    /// Line number at which parsing this node began.
    pub fn position(&self) -> usize {
        match self {
            Node::Include { position, .. }
            | Node::Predefine { position, .. }
            | Node::Variable { position, .. }
            | Node::Array { position, .. }
            | Node::Function { position, .. }
            | Node::Block { position, .. }
            | Node::Inline { position, .. }
            | Node::If { position, .. }
            | Node::While { position, .. }
            | Node::DoWhile { position, .. }
            | Node::For { position, .. }
            | Node::Return { position, .. }
            | Node::Break { position, .. }
            | Node::Continue { position, .. }
            | Node::Expression { position, .. }
            | Node::Binary { position, .. }
            | Node::Index { position, .. }
            | Node::Call { position, .. }
            | Node::Parentheses { position, .. }
            | Node::ArrayLiteral { position, .. }
            | Node::CharLiteral { position, .. }
            | Node::StringLiteral { position, .. }
            | Node::Number { position, .. }
            | Node::BlockComment { position, .. }
            | Node::InlineComment { position, .. } => *position,
            Node::Declaration(declaration) => declaration.position,
            Node::Identifier(identifier) => identifier.position,
        }
    }

    /// Render this node as a tagged record: `kind`, `position`, then the
    /// attributes of the particular kind.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Declaration(declaration) => return declaration.to_json(),
            Node::Identifier(identifier) => return identifier.to_json(),
            _ => {}
        }

        let mut object = Map::new();
        object.insert("kind".into(), Value::String(self.kind()));
        object.insert("position".into(), Value::from(self.position() as u64));

        match self {
            Node::Include { file, .. } => {
                object.insert("file".into(), Value::from(file.as_str()));
            }
            Node::Predefine { identifier, arguments, value, .. } => {
                object.insert("identifier".into(), identifier.to_json());
                let arguments = match arguments {
                    Some(entries) => nullable_entries(entries),
                    None => Value::Null,
                };
                object.insert("arguments".into(), arguments);
                object.insert("value".into(), nullable(value));
            }
            Node::Variable { defined, identifier, var_type, value, .. } => {
                object.insert("identifier".into(), identifier.to_json());
                object.insert("type".into(), var_type.to_json());
                if *defined {
                    object.insert("value".into(), nullable(value));
                }
            }
            Node::Array { defined, identifier, var_type, length, value, .. } => {
                object.insert("identifier".into(), identifier.to_json());
                object.insert("type".into(), var_type.to_json());
                object.insert("length".into(), nullable_entries(length));
                if *defined {
                    object.insert("value".into(), nullable(value));
                }
            }
            Node::Function { identifier, return_type, parameters, body, .. } => {
                object.insert("identifier".into(), identifier.to_json());
                object.insert("type".into(), return_type.to_json());
                object.insert(
                    "parameters".into(),
                    Value::Array(parameters.iter().map(Declaration::to_json).collect()),
                );
                if let Some(body) = body {
                    object.insert("body".into(), body.to_json());
                }
            }
            Node::Block { body, .. } | Node::Inline { body, .. } => {
                object.insert("body".into(), node_list(body));
            }
            Node::If { condition, body, else_body, .. } => {
                object.insert("condition".into(), condition.to_json());
                object.insert("body".into(), body.to_json());
                object.insert("elseBody".into(), nullable(else_body));
            }
            Node::While { condition, body, .. } | Node::DoWhile { condition, body, .. } => {
                object.insert("condition".into(), condition.to_json());
                object.insert("body".into(), body.to_json());
            }
            Node::For { init, condition, step, body, .. } => {
                object.insert("init".into(), init.to_json());
                object.insert("condition".into(), nullable(condition));
                object.insert("step".into(), nullable(step));
                object.insert("body".into(), body.to_json());
            }
            Node::Return { value, .. } => {
                object.insert("value".into(), nullable(value));
            }
            Node::Break { label, .. } | Node::Continue { label, .. } => {
                object.insert("label".into(), nullable(label));
            }
            Node::Expression { expression, .. } | Node::Parentheses { expression, .. } => {
                object.insert("expression".into(), nullable(expression));
            }
            Node::Binary { left, right, op, .. } => {
                object.insert("left".into(), nullable(left));
                object.insert("right".into(), right.to_json());
                object.insert("op".into(), Value::from(*op));
            }
            Node::Index { array, indexes, .. } => {
                object.insert("array".into(), nullable(array));
                object.insert("indexes".into(), nullable_entries(indexes));
            }
            Node::Call { callee, arguments, .. } => {
                object.insert("callee".into(), callee.to_json());
                object.insert("arguments".into(), nullable_entries(arguments));
            }
            Node::ArrayLiteral { value, .. } => {
                object.insert("value".into(), nullable_entries(value));
            }
            Node::CharLiteral { value, .. }
            | Node::StringLiteral { value, .. }
            | Node::Number { value, .. } => {
                object.insert("value".into(), Value::from(value.as_str()));
            }
            Node::BlockComment { content, .. } | Node::InlineComment { content, .. } => {
                object.insert("content".into(), Value::from(content.as_str()));
            }
            Node::Declaration(_) | Node::Identifier(_) => {}
        }

        Value::Object(object)
    }
}

fn nullable(node: &Option<Box<Node>>) -> Value {
    match node {
        Some(node) => node.to_json(),
        None => Value::Null,
    }
}

fn nullable_entries(entries: &[Option<Node>]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|entry| match entry {
                Some(node) => node.to_json(),
                None => Value::Null,
            })
            .collect(),
    )
}

fn node_list(nodes: &[Node]) -> Value {
    Value::Array(nodes.iter().map(Node::to_json).collect())
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub body: Vec<Node>,
}

impl Program {
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("kind".into(), Value::from("Program"));
        object.insert("body".into(), node_list(&self.body));
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_kind_prefixes() {
        let number = Node::Number {
            position: 1,
            value: "5lu".to_string(),
            base: NumberBase::Decimal,
            long_suffix: true,
            unsigned_suffix: true,
        };
        assert_eq!(number.kind(), "UnsignedLongNumberLiteral");

        let hex = Node::Number {
            position: 1,
            value: "0xffl".to_string(),
            base: NumberBase::Hex,
            long_suffix: true,
            unsigned_suffix: false,
        };
        assert_eq!(hex.kind(), "LongHexNumberLiteral");
    }

    #[test]
    fn test_variable_kind_prefixes() {
        let global = Node::Variable {
            position: 1,
            scope: VarScope::Global,
            defined: false,
            identifier: Ident { position: 1, name: "x".to_string() },
            var_type: TypeNode { position: 1, name: "int".to_string(), modifiers: vec![] },
            value: None,
        };
        assert_eq!(global.kind(), "GlobalVariableDeclaration");

        let for_init = Node::Variable {
            position: 1,
            scope: VarScope::For,
            defined: true,
            identifier: Ident { position: 1, name: "i".to_string() },
            var_type: TypeNode { position: 1, name: "int".to_string(), modifiers: vec![] },
            value: None,
        };
        assert_eq!(for_init.kind(), "ForVariableDefinition");
    }

    #[test]
    fn test_declaration_serialization() {
        let declaration = Declaration {
            position: 3,
            kind: DeclKind::ParameterDeclaration,
            identifier: Ident { position: 3, name: "n".to_string() },
            decl_type: TypeNode {
                position: 3,
                name: "int".to_string(),
                modifiers: vec!["unsigned".to_string()],
            },
        };
        let json = declaration.to_json();
        assert_eq!(json["kind"], "ParameterDeclaration");
        assert_eq!(json["position"], 3);
        assert_eq!(json["identifier"]["name"], "n");
        assert_eq!(json["type"]["name"], "int");
        assert_eq!(json["type"]["modifiers"][0], "unsigned");
    }

    #[test]
    fn test_if_serializes_null_else() {
        let node = Node::If {
            position: 2,
            condition: Box::new(Node::Identifier(Ident { position: 2, name: "x".to_string() })),
            body: Box::new(Node::Inline { position: 2, body: vec![] }),
            else_body: None,
        };
        let json = node.to_json();
        assert_eq!(json["kind"], "IfStatement");
        assert!(json["elseBody"].is_null());
    }
}
