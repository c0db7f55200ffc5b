//! # Introduction
//!
//! CrAST parses a restricted dialect of C into an abstract syntax tree and
//! serializes it as a tree of tagged records, each node carrying a `kind`
//! discriminator, the line it was parsed at, and per-kind attributes. It is
//! the front end of a translator or pretty-printer: downstream passes
//! traverse the tree, the parser never interprets it.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Parser (integrated lexing) → AST → JSON tagged records
//! ```
//!
//! 1. [`parser::parse`]: the recursive descent parser. Lexing is folded
//!    into parsing: the scanner works at the character level with
//!    backtracking lookahead, a type-name table grown by `typedef`, and
//!    precedence climbing for binary expressions.
//! 2. [`parser::ast`]: the typed node definitions and their serialized
//!    form.
//!
//! ## Supported C subset
//!
//! Globals, arrays, functions, `typedef`, `#include`/`#define`, the
//! structured statements (`if`/`else`, `while`, `do`-`while`, `for`,
//! `return`, `break`, `continue`) and binary expressions. Comments are
//! preserved as nodes in the enclosing statement list; whitespace is not.
//! `struct` and `enum` are rejected outright.

pub mod parser;
