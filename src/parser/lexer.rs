//! Literal and identifier lexing
//!
//! These routines run directly on the scanner cursor; there is no separate
//! token stream. Numbers keep their textual form (sign, `0x` prefix and
//! suffix letters included) so a printer can reproduce the source spelling.
//!
//! Escape handling is deliberately asymmetric: `\xHH` and octal escapes
//! decode to the raw character they name, while single-character escapes
//! like `\n` are re-emitted in source form as backslash plus letter.

use crate::parser::ast::{Ident, Node, NumberBase};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::scanner::{is_float_char, is_identifier_body, is_identifier_start};

impl Parser {
    /// Parse an identifier at the cursor.
    pub(crate) fn parse_identifier(&mut self, keep_blanks: bool) -> Result<Ident, ParseError> {
        let Some(first) = self.curr.filter(|&c| is_identifier_start(c)) else {
            return Err(self.unexpected("Identifier"));
        };
        let position = self.line_number;
        let mut name = String::from(first);
        self.advance(true, false)?;
        while let Some(c) = self.curr {
            if !is_identifier_body(c) {
                break;
            }
            name.push(c);
            self.advance(true, false)?;
        }
        if !keep_blanks {
            self.skip_spaces()?;
        }
        Ok(Ident { position, name })
    }

    /// Parse a number literal. `radix` is 16 when the caller already matched
    /// a `0x` prefix, 10 otherwise (the cursor may then sit on a digit, `.`
    /// or the `-` of a negative literal).
    pub(crate) fn parse_number(&mut self, radix: u32) -> Result<Node, ParseError> {
        if radix == 16 && !self.curr.is_some_and(|c| c.is_ascii_hexdigit()) {
            return Err(self.unexpected("Number"));
        }
        let Some(first) = self.curr else {
            return Err(self.unexpected("Number"));
        };
        let position = self.line_number;
        let mut base = if radix == 16 { NumberBase::Hex } else { NumberBase::Decimal };
        if first == '.' {
            base = NumberBase::Float;
        }
        let mut value = String::from(first);
        self.advance(true, false)?;

        while let Some(c) = self.curr {
            let digit = if radix == 16 { c.is_ascii_hexdigit() } else { is_float_char(c) };
            let exponent = radix != 16 && c.to_ascii_lowercase() == 'e';
            let exponent_sign = radix != 16
                && c == '-'
                && self.index > 0
                && self
                    .source
                    .get(self.index - 1)
                    .is_some_and(|p| p.to_ascii_lowercase() == 'e');
            if !(digit || exponent || exponent_sign) {
                break;
            }
            if c == '.' {
                base = NumberBase::Float;
            }
            value.push(c);
            self.advance(true, false)?;
        }

        // A leading zero with no fraction spells an octal literal.
        if radix != 16 && base != NumberBase::Float && value.starts_with('0') {
            base = NumberBase::Octal;
        }

        let mut long_suffix = false;
        if let Some(c) = self.curr.filter(|c| c.to_ascii_lowercase() == 'l') {
            long_suffix = true;
            value.push(c);
            self.advance(true, false)?;
        }
        let mut unsigned_suffix = false;
        if let Some(c) = self.curr.filter(|c| c.to_ascii_lowercase() == 'u') {
            unsigned_suffix = true;
            value.push(c);
            self.advance(true, false)?;
        }

        if radix == 16 && self.curr == Some('.') {
            return Err(self.unexpected("hex number"));
        }
        if radix == 16 {
            value.insert_str(0, "0x");
        }
        self.skip_spaces()?;
        Ok(Node::Number { position, value, base, long_suffix, unsigned_suffix })
    }

    /// Parse the body of a string literal; the cursor sits on the opening
    /// quote. Whitespace inside the string is preserved verbatim.
    pub(crate) fn parse_string(&mut self, keep_blanks: bool) -> Result<String, ParseError> {
        let mut value = String::new();
        self.advance(true, true)?;
        while let Some(c) = self.curr {
            if c == '"' {
                break;
            }
            if c == '\\' {
                let escape = self.parse_escape()?;
                value.push_str(&escape);
            } else {
                value.push(c);
                self.advance(true, true)?;
            }
        }
        let closed = if keep_blanks {
            self.lookahead_keeping_blanks("\"")?
        } else {
            self.lookahead("\"")?
        };
        if !closed {
            return Err(self.unexpected("double quote"));
        }
        Ok(value)
    }

    /// Parse an escape sequence; the cursor sits on the backslash.
    pub(crate) fn parse_escape(&mut self) -> Result<String, ParseError> {
        // Step over the backslash without trivia handling.
        self.index += 1;
        self.curr = self.source.get(self.index).copied();
        match self.curr {
            Some('x') => {
                self.advance(true, true)?;
                let mut code: u32 = 0;
                for _ in 0..2 {
                    let Some(digit) = self.curr.and_then(|c| c.to_digit(16)) else {
                        break;
                    };
                    code = code * 16 + digit;
                    self.advance(true, true)?;
                }
                Ok(((code as u8) as char).to_string())
            }
            Some(c) if c.is_digit(8) => {
                let mut code: u32 = 0;
                for _ in 0..3 {
                    let Some(digit) = self.curr.and_then(|c| c.to_digit(8)) else {
                        break;
                    };
                    code = code * 8 + digit;
                    self.advance(true, true)?;
                }
                Ok(((code as u8) as char).to_string())
            }
            Some(c) if self.escapes.contains(&c) => {
                self.advance(true, true)?;
                Ok(format!("\\{}", c))
            }
            _ => Err(self.unexpected("escape sequence")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{Node, NumberBase};
    use crate::parser::parse::Parser;

    fn number(source: &str, radix: u32) -> Node {
        let mut parser = Parser::new(source);
        if radix == 16 {
            assert!(parser.lookahead("0x").unwrap());
        }
        parser.parse_number(radix).unwrap()
    }

    fn assert_number(node: &Node, expected_value: &str, expected_kind: &str) {
        match node {
            Node::Number { value, .. } => {
                assert_eq!(value, expected_value);
                assert_eq!(node.kind(), expected_kind);
            }
            other => panic!("expected number literal, got {:?}", other),
        }
    }

    #[test]
    fn test_identifier() {
        let mut parser = Parser::new("counter_2 = 1;");
        let ident = parser.parse_identifier(false).unwrap();
        assert_eq!(ident.name, "counter_2");
        assert_eq!(parser.curr, Some('='));
    }

    #[test]
    fn test_decimal_number() {
        assert_number(&number("42;", 10), "42", "NumberLiteral");
    }

    #[test]
    fn test_zero_promotes_to_octal() {
        assert_number(&number("0;", 10), "0", "OctNumberLiteral");
    }

    #[test]
    fn test_octal_number() {
        assert_number(&number("042;", 10), "042", "OctNumberLiteral");
    }

    #[test]
    fn test_float_number() {
        assert_number(&number("3.14;", 10), "3.14", "FloatNumberLiteral");
        assert_number(&number(".5;", 10), ".5", "FloatNumberLiteral");
        assert_number(&number("0.5;", 10), "0.5", "FloatNumberLiteral");
    }

    #[test]
    fn test_exponent_number() {
        assert_number(&number("1e-5;", 10), "1e-5", "NumberLiteral");
        assert_number(&number("2.5E3;", 10), "2.5E3", "FloatNumberLiteral");
    }

    #[test]
    fn test_negative_number() {
        assert_number(&number("-7;", 10), "-7", "NumberLiteral");
    }

    #[test]
    fn test_hex_number() {
        let node = number("0xff;", 16);
        assert_number(&node, "0xff", "HexNumberLiteral");
        match node {
            Node::Number { base, .. } => assert_eq!(base, NumberBase::Hex),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_hex_with_zero_digit_stays_hex() {
        assert_number(&number("0x0f;", 16), "0x0f", "HexNumberLiteral");
    }

    #[test]
    fn test_hex_rejects_fraction() {
        let mut parser = Parser::new("0x1f.5;");
        assert!(parser.lookahead("0x").unwrap());
        let err = parser.parse_number(16).unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect hex number");
    }

    #[test]
    fn test_number_suffixes() {
        assert_number(&number("5l;", 10), "5l", "LongNumberLiteral");
        assert_number(&number("5u;", 10), "5u", "UnsignedNumberLiteral");
        assert_number(&number("5lu;", 10), "5lu", "UnsignedLongNumberLiteral");
        assert_number(&number("0xffL;", 16), "0xffL", "LongHexNumberLiteral");
    }

    #[test]
    fn test_string_preserves_named_escapes() {
        let mut parser = Parser::new(r#""a\nb" x"#);
        let value = parser.parse_string(false).unwrap();
        assert_eq!(value, "a\\nb");
        assert_eq!(parser.curr, Some('x'));
    }

    #[test]
    fn test_string_decodes_hex_and_octal_escapes() {
        let mut parser = Parser::new(r#""\x41\101""#);
        let value = parser.parse_string(false).unwrap();
        assert_eq!(value, "AA");
    }

    #[test]
    fn test_string_keeps_interior_whitespace() {
        let mut parser = Parser::new("\"a  b\tc\";");
        let value = parser.parse_string(false).unwrap();
        assert_eq!(value, "a  b\tc");
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let mut parser = Parser::new("\"open");
        let err = parser.parse_string(false).unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect double quote");
    }

    #[test]
    fn test_unknown_escape_is_an_error() {
        let mut parser = Parser::new(r#""\q""#);
        let err = parser.parse_string(false).unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect escape sequence");
    }

    #[test]
    fn test_escape_nul() {
        let mut parser = Parser::new(r"\0'");
        let value = parser.parse_escape().unwrap();
        assert_eq!(value, "\0");
        assert_eq!(parser.curr, Some('\''));
    }
}
