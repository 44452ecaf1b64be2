//! Splitting a text block into operator/operand pairs.
//!
//! Text operators come in two shapes: two-byte mnemonics that all start with
//! `T` (`Td`, `Tj`, `T*`, ...) and the one-byte `'` and `"` shorthands. The
//! tokenizer does not lex operands; everything between two operators is handed
//! to the operator as its raw operand string.

use std::borrow::Cow;

use super::scanner::{LiteralScanner, ScanEvent};
use crate::error::{Error, Result};

const BLOCK_START: &str = "BT";
const BLOCK_END: &str = "ET";

/// An operator and the raw operand text that preceded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Operator mnemonic bytes
    pub operator: &'a [u8],
    /// Operand bytes since the previous operator
    pub operand: &'a [u8],
}

impl<'a> Token<'a> {
    /// Operator mnemonic as text.
    pub fn operator_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.operator)
    }

    /// Operand as text.
    pub fn operand_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.operand)
    }
}

/// Strip the `BT`/`ET` markers from a raw block and return its body.
///
/// Surrounding whitespace is ignored. A missing marker or another marker
/// inside the body (outside string literals) is a structural error.
pub fn block_body(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix(BLOCK_START)
        .and_then(|rest| rest.strip_suffix(BLOCK_END))
        .ok_or_else(|| Error::Structural(format!("'{}' is not a valid text block", raw)))?;
    if contains_block_marker(body.as_bytes()) {
        return Err(Error::Structural(
            "text block cannot contain another start or end text block".to_string(),
        ));
    }
    Ok(body)
}

fn contains_block_marker(body: &[u8]) -> bool {
    let mut scanner = LiteralScanner::new();
    let outside: Vec<u8> = body
        .iter()
        .map(|&b| match scanner.step(b) {
            ScanEvent::Byte {
                byte,
                inside: false,
                escaped: false,
            } => byte,
            _ => b' ',
        })
        .collect();
    outside
        .split(|b| b.is_ascii_whitespace() || matches!(b, b'[' | b']' | b'<' | b'>'))
        .any(|word| word == BLOCK_START.as_bytes() || word == BLOCK_END.as_bytes())
}

/// Iterator over the operators of a block body.
///
/// A `T` starts a two-byte operator only at a token boundary, so names such
/// as `/TT1` are not split. Bytes inside string literals never form operators.
pub struct BlockTokenizer<'a> {
    body: &'a [u8],
    pos: usize,
    start: usize,
    scanner: LiteralScanner,
    prev: Option<u8>,
    pending_t: Option<usize>,
    finished: bool,
}

impl<'a> BlockTokenizer<'a> {
    /// Create a tokenizer over a block body (markers already removed).
    pub fn new(body: &'a str) -> Self {
        Self {
            body: body.as_bytes(),
            pos: 0,
            start: 0,
            scanner: LiteralScanner::new(),
            prev: None,
            pending_t: None,
            finished: false,
        }
    }

    fn emit(&mut self, operator_start: usize) -> Token<'a> {
        let token = Token {
            operator: &self.body[operator_start..self.pos],
            operand: &self.body[self.start..operator_start],
        };
        self.start = self.pos;
        self.prev = None;
        self.pending_t = None;
        token
    }

    fn finish(&mut self) -> Option<Result<Token<'a>>> {
        self.finished = true;
        if self.scanner.is_inside() {
            return Some(Err(Error::Structural(format!(
                "unterminated string literal in '{}'",
                String::from_utf8_lossy(&self.body[self.start..])
            ))));
        }
        let rest = &self.body[self.start..];
        if rest.iter().any(|b| !b.is_ascii_whitespace()) {
            return Some(Err(Error::Structural(format!(
                "operands '{}' are not followed by an operator",
                String::from_utf8_lossy(rest).trim()
            ))));
        }
        None
    }
}

fn is_boundary(prev: Option<u8>) -> bool {
    match prev {
        None => true,
        Some(b) => b.is_ascii_whitespace() || matches!(b, b']' | b')' | b'>'),
    }
}

impl<'a> Iterator for BlockTokenizer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while self.pos < self.body.len() {
            let b = self.body[self.pos];
            self.pos += 1;
            match self.scanner.step(b) {
                ScanEvent::Byte {
                    byte,
                    inside: false,
                    escaped: false,
                } => {
                    if let Some(t_pos) = self.pending_t {
                        return Some(Ok(self.emit(t_pos)));
                    }
                    if byte == b'T' && is_boundary(self.prev) {
                        self.pending_t = Some(self.pos - 1);
                    } else if byte == b'\'' || byte == b'"' {
                        return Some(Ok(self.emit(self.pos - 1)));
                    }
                }
                _ => self.pending_t = None,
            }
            self.prev = Some(b);
        }
        self.finish()
    }
}
