//! Escape-aware scanning of string literals.
//!
//! Both the block tokenizer and the text-run parser need to know whether a
//! byte sits inside a `( ... )` literal and whether it was escaped. They share
//! this scanner so the two never disagree about where a literal ends.

/// Classification of one scanned byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// An unescaped open delimiter outside a literal.
    Open,
    /// An unescaped close delimiter ending the current literal.
    Close,
    /// An escape marker. The marker itself is not content.
    Escape,
    /// Any other byte.
    Byte {
        /// The byte value
        byte: u8,
        /// Whether the byte is inside a literal
        inside: bool,
        /// Whether the byte followed an escape marker
        escaped: bool,
    },
}

/// Two-state scanner (outside / inside literal) with an escape-pending flag.
///
/// Balanced unescaped delimiters inside a literal are content: `(f(x)y)` is a
/// single literal holding `f(x)y`.
#[derive(Debug, Clone)]
pub struct LiteralScanner {
    open: u8,
    close: u8,
    escape: u8,
    inside: bool,
    escape_pending: bool,
    depth: usize,
}

impl LiteralScanner {
    /// Scanner for PDF string literals: `(`, `)` and `\`.
    pub fn new() -> Self {
        Self::with_delimiters(b'(', b')', b'\\')
    }

    /// Scanner with custom delimiter and escape bytes.
    pub fn with_delimiters(open: u8, close: u8, escape: u8) -> Self {
        Self {
            open,
            close,
            escape,
            inside: false,
            escape_pending: false,
            depth: 0,
        }
    }

    /// Whether the scanner is currently inside a literal.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Whether the last byte was an unconsumed escape marker.
    pub fn is_escape_pending(&self) -> bool {
        self.escape_pending
    }

    /// Feed one byte.
    pub fn step(&mut self, byte: u8) -> ScanEvent {
        if self.escape_pending {
            self.escape_pending = false;
            return ScanEvent::Byte {
                byte,
                inside: self.inside,
                escaped: true,
            };
        }
        if byte == self.escape {
            self.escape_pending = true;
            return ScanEvent::Escape;
        }
        if self.inside {
            if byte == self.open {
                self.depth += 1;
            } else if byte == self.close {
                if self.depth == 0 {
                    self.inside = false;
                    return ScanEvent::Close;
                }
                self.depth -= 1;
            }
        } else if byte == self.open {
            self.inside = true;
            return ScanEvent::Open;
        }
        ScanEvent::Byte {
            byte,
            inside: self.inside,
            escaped: false,
        }
    }
}

impl Default for LiteralScanner {
    fn default() -> Self {
        Self::new()
    }
}
