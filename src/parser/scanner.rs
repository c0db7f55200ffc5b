//! Scanner substrate: character-level cursor, lookahead and comment capture
//!
//! The parser lexes directly off the character buffer, so the scanning
//! primitives here are where whitespace and comments disappear from the
//! token stream. Every committing operation routes through [`Parser::advance`],
//! which skips trivia and queues any comment it crosses; the queue is later
//! flushed into the nearest enclosing statement list.
//!
//! [`Parser::lookahead`] is the backbone of the whole parser: a committing
//! match that restores the full scanner state on failure, and refuses to
//! match a keyword that is only the prefix of a longer identifier.

use crate::parser::ast::Node;
use crate::parser::parse::{ParseError, Parser};

/// Saved cursor for backtracking probes.
///
/// Restoring truncates the comment queue back to its saved length, so a
/// probe that crossed a comment does not leave a duplicate behind when the
/// same text is scanned again.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScannerState {
    index: usize,
    curr: Option<char>,
    line_number: usize,
    pending_comments: usize,
}

pub(crate) fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_identifier_body(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether a token is shaped like an identifier (and therefore must not be
/// matched as a prefix of a longer one).
pub(crate) fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_body),
        _ => false,
    }
}

/// Characters that may begin or continue a decimal number literal.
pub(crate) fn is_float_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Characters that may not appear outside literals and comments.
fn is_illegal(c: char) -> bool {
    !c.is_ascii() || (c.is_ascii_control() && !c.is_ascii_whitespace())
}

impl Parser {
    pub(crate) fn save(&self) -> ScannerState {
        ScannerState {
            index: self.index,
            curr: self.curr,
            line_number: self.line_number,
            pending_comments: self.comments.len(),
        }
    }

    pub(crate) fn restore(&mut self, state: ScannerState) {
        self.index = state.index;
        self.curr = state.curr;
        self.line_number = state.line_number;
        self.comments.truncate(state.pending_comments);
    }

    /// Move to the next character, then skip trivia according to the flags.
    ///
    /// `keep_spaces` leaves whitespace in place (used while matching the
    /// characters of a token); `keep_comments` disables comment capture and
    /// the illegal-character check (used inside literals and comment bodies,
    /// where any character goes).
    pub(crate) fn advance(&mut self, keep_spaces: bool, keep_comments: bool) -> Result<(), ParseError> {
        if self.curr == Some('\n') {
            self.line_number += 1;
        }
        self.index += 1;
        self.curr = self.source.get(self.index).copied();
        self.skip_trivia(keep_spaces, keep_comments)
    }

    /// The trivia-skipping half of [`Parser::advance`], looped until no
    /// whitespace run or comment makes further progress.
    pub(crate) fn skip_trivia(&mut self, keep_spaces: bool, keep_comments: bool) -> Result<(), ParseError> {
        loop {
            let mut skipped = false;
            if !keep_spaces {
                while let Some(c) = self.curr {
                    if !is_space(c) {
                        break;
                    }
                    if c == '\n' {
                        self.line_number += 1;
                    }
                    self.index += 1;
                    self.curr = self.source.get(self.index).copied();
                    skipped = true;
                }
            }
            if !keep_comments {
                if let Some(comment) = self.parse_comment()? {
                    self.comments.push(comment);
                    skipped = true;
                }
                if let Some(c) = self.curr {
                    if is_illegal(c) {
                        return Err(self.unexpected("legal character"));
                    }
                }
            }
            if !skipped {
                return Ok(());
            }
        }
    }

    pub(crate) fn skip_spaces(&mut self) -> Result<(), ParseError> {
        if self.curr.is_some_and(is_space) {
            self.advance(false, false)?;
        }
        Ok(())
    }

    /// Try to match `token` at the cursor. Commits (and skips trailing
    /// blanks) on success, restores the scanner on failure.
    pub(crate) fn lookahead(&mut self, token: &str) -> Result<bool, ParseError> {
        self.lookahead_at(token, false)
    }

    /// [`Parser::lookahead`] without the trailing blank skip, for contexts
    /// where the characters after the match are significant (comment and
    /// string bodies).
    pub(crate) fn lookahead_keeping_blanks(&mut self, token: &str) -> Result<bool, ParseError> {
        self.lookahead_at(token, true)
    }

    fn lookahead_at(&mut self, token: &str, keep_blanks: bool) -> Result<bool, ParseError> {
        let state = self.save();
        for c in token.chars() {
            if self.curr != Some(c) {
                self.restore(state);
                return Ok(false);
            }
            self.advance(true, false)?;
        }

        // A keyword must not match the prefix of a longer identifier:
        // `if` stops before `iffy`.
        if is_identifier(token) && self.curr.is_some_and(is_identifier_body) {
            self.restore(state);
            return Ok(false);
        }

        if !keep_blanks {
            self.skip_spaces()?;
        }
        Ok(true)
    }

    /// Mandatory match: every character of `token` must be present, with
    /// trivia skipped after each.
    pub(crate) fn consume(&mut self, token: &str) -> Result<(), ParseError> {
        for c in token.chars() {
            if self.curr != Some(c) {
                return Err(self.unexpected(token));
            }
            self.advance(false, false)?;
        }
        Ok(())
    }

    /// Parse a `/* */` or `//` comment starting at the cursor, if any.
    ///
    /// Called from [`Parser::skip_trivia`], so comments are discovered during
    /// whitespace skipping deep inside lexing; they land on the pending queue
    /// rather than attaching to whatever token was being read.
    pub(crate) fn parse_comment(&mut self) -> Result<Option<Node>, ParseError> {
        if self.lookahead_keeping_blanks("/*")? {
            let position = self.line_number;
            let mut content = String::new();
            loop {
                match self.curr {
                    None => return Err(self.unexpected("*/")),
                    Some('*') if self.source.get(self.index + 1) == Some(&'/') => break,
                    Some(c) => {
                        content.push(c);
                        self.advance(true, true)?;
                    }
                }
            }
            // Step over the closing delimiter without trivia handling.
            self.index += 2;
            self.curr = self.source.get(self.index).copied();
            Ok(Some(Node::BlockComment { position, content }))
        } else if self.lookahead_keeping_blanks("//")? {
            let position = self.line_number;
            let mut content = String::new();
            while let Some(c) = self.curr {
                if c == '\n' {
                    break;
                }
                content.push(c);
                self.advance(true, true)?;
            }
            Ok(Some(Node::InlineComment { position, content }))
        } else {
            Ok(None)
        }
    }

    /// Move all pending comments into `statements`, preserving order.
    pub(crate) fn flush_comments(&mut self, statements: &mut Vec<Node>) {
        statements.append(&mut self.comments);
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Node;
    use crate::parser::parse::Parser;

    #[test]
    fn test_lookahead_commits_on_match() {
        let mut parser = Parser::new("while (x)");
        assert!(parser.lookahead("while").unwrap());
        assert_eq!(parser.curr, Some('('));
    }

    #[test]
    fn test_lookahead_restores_on_mismatch() {
        let mut parser = Parser::new("whale (x)");
        assert!(!parser.lookahead("while").unwrap());
        assert_eq!(parser.curr, Some('w'));
        assert_eq!(parser.index, 0);
    }

    #[test]
    fn test_lookahead_respects_identifier_boundary() {
        let mut parser = Parser::new("iffy = 1;");
        assert!(!parser.lookahead("if").unwrap());
        assert_eq!(parser.curr, Some('i'));
        assert!(parser.lookahead("iffy").unwrap());
    }

    #[test]
    fn test_lookahead_boundary_includes_digits() {
        let mut parser = Parser::new("if1 = 1;");
        assert!(!parser.lookahead("if").unwrap());
    }

    #[test]
    fn test_non_identifier_token_may_be_prefix() {
        let mut parser = Parser::new("#include <a.h>");
        assert!(parser.lookahead("#include").unwrap());
        assert_eq!(parser.curr, Some('<'));
    }

    #[test]
    fn test_consume_reports_expected_token() {
        let mut parser = Parser::new("x");
        let err = parser.consume(";").unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect ;");
    }

    #[test]
    fn test_advance_tracks_line_numbers() {
        let mut parser = Parser::new("a\n\nb");
        assert_eq!(parser.line_number, 1);
        parser.advance(false, false).unwrap();
        assert_eq!(parser.curr, Some('b'));
        assert_eq!(parser.line_number, 3);
    }

    #[test]
    fn test_restore_rewinds_line_number() {
        let mut parser = Parser::new("int\nx;");
        let state = parser.save();
        assert!(parser.lookahead("int").unwrap());
        assert_eq!(parser.line_number, 2);
        parser.restore(state);
        assert_eq!(parser.line_number, 1);
    }

    #[test]
    fn test_failed_lookahead_restores_line_number() {
        let mut parser = Parser::new("i\nnt");
        assert!(!parser.lookahead("int").unwrap());
        assert_eq!(parser.line_number, 1);
    }

    #[test]
    fn test_block_comment_content() {
        let mut parser = Parser::new("/* hello */x");
        let comment = parser.parse_comment().unwrap().unwrap();
        match comment {
            Node::BlockComment { content, .. } => assert_eq!(content, " hello "),
            other => panic!("expected block comment, got {:?}", other),
        }
        assert_eq!(parser.curr, Some('x'));
    }

    #[test]
    fn test_inline_comment_stops_before_newline() {
        let mut parser = Parser::new("// note\nx");
        let comment = parser.parse_comment().unwrap().unwrap();
        match comment {
            Node::InlineComment { content, .. } => assert_eq!(content, " note"),
            other => panic!("expected inline comment, got {:?}", other),
        }
        assert_eq!(parser.curr, Some('\n'));
    }

    #[test]
    fn test_unterminated_block_comment_is_an_error() {
        let mut parser = Parser::new("/* never closed");
        let err = parser.parse_comment().unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect */");
    }

    #[test]
    fn test_illegal_character_is_rejected() {
        let mut parser = Parser::new("\u{1}x");
        let err = parser.skip_trivia(false, false).unwrap_err();
        assert_eq!(err.to_string(), "Line number 1: Expect legal character");
    }

    #[test]
    fn test_probe_across_comment_does_not_duplicate_it() {
        // A failed multi-character match that crossed a comment must not
        // leave the comment queued twice once the text is rescanned.
        let mut parser = Parser::new("i/*c*/x");
        assert!(!parser.lookahead("if").unwrap());
        assert!(parser.comments.is_empty());
    }
}
