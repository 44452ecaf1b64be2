//! Operand grammars for the text operators.

use lazy_static::lazy_static;
use regex::Regex;

use super::scanner::{LiteralScanner, ScanEvent};
use crate::error::{Error, Result};
use crate::model::TextRun;

/// Adjustment used for a run with no (or an unreadable) preceding number.
pub const DEFAULT_ADJUSTMENT: f64 = 1.0;

/// Plain decimal number; no exponent, `inf` or `NaN`.
const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)";

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(&format!(r"^{}$", NUMBER)).unwrap();
    static ref XY_RE: Regex =
        Regex::new(&format!(r"^\s*({0})\s+({0})\s*$", NUMBER)).unwrap();
    static ref SINGLE_RE: Regex = Regex::new(&format!(r"^\s*({})\s*$", NUMBER)).unwrap();
    static ref FONT_RE: Regex = Regex::new(&format!(r"^\s*(\S+)\s+({})\s*$", NUMBER)).unwrap();
    static ref QUOTE_RE: Regex =
        Regex::new(&format!(r"(?s)^\s*({0})\s+({0})\s*(.+)$", NUMBER)).unwrap();
    static ref ADJUST_RE: regex::bytes::Regex =
        regex::bytes::Regex::new(r"[\d.\-]+$").unwrap();
}

fn operand_error(operator: &str, operand: &str, expected: &'static str) -> Error {
    Error::OperandParse {
        operator: operator.to_string(),
        operand: operand.to_string(),
        expected,
    }
}

fn number(operator: &str, operand: &str, text: &str) -> Result<f64> {
    if !NUMBER_RE.is_match(text) {
        return Err(operand_error(operator, operand, "a number"));
    }
    text.parse::<f64>()
        .map_err(|_| operand_error(operator, operand, "a number"))
}

/// Parse an `x y` pair (`Td`, `TD`).
pub fn parse_xy(operator: &str, operand: &str) -> Result<(f64, f64)> {
    let caps = XY_RE
        .captures(operand)
        .ok_or_else(|| operand_error(operator, operand, "two numbers"))?;
    Ok((
        number(operator, operand, &caps[1])?,
        number(operator, operand, &caps[2])?,
    ))
}

/// Parse a single number (`TL`, `Tc`, `Tw`, `Tz`).
pub fn parse_single(operator: &str, operand: &str) -> Result<f64> {
    let caps = SINGLE_RE
        .captures(operand)
        .ok_or_else(|| operand_error(operator, operand, "one number"))?;
    number(operator, operand, &caps[1])
}

/// Parse the six numbers of a `Tm` matrix.
pub fn parse_matrix(operator: &str, operand: &str) -> Result<[f64; 6]> {
    let values = operand
        .split_ascii_whitespace()
        .map(|token| number(operator, operand, token))
        .collect::<Result<Vec<f64>>>()?;
    <[f64; 6]>::try_from(values).map_err(|_| operand_error(operator, operand, "six numbers"))
}

/// Parse `name size` for `Tf`. The leading `/` of the name is removed.
pub fn parse_font(operator: &str, operand: &str) -> Result<(String, f64)> {
    let caps = FONT_RE
        .captures(operand)
        .ok_or_else(|| operand_error(operator, operand, "a font name and size"))?;
    let name = caps[1].strip_prefix('/').unwrap_or(&caps[1]).to_string();
    let size = number(operator, operand, &caps[2])?;
    Ok((name, size))
}

/// Parse `word_spacing char_spacing text` for the `"` operator.
pub fn parse_quote<'a>(operator: &str, operand: &'a str) -> Result<(f64, f64, &'a str)> {
    let caps = QUOTE_RE.captures(operand).ok_or_else(|| {
        operand_error(operator, operand, "word spacing, char spacing and a string")
    })?;
    let word = number(operator, operand, &caps[1])?;
    let chars = number(operator, operand, &caps[2])?;
    let text = caps.get(3).map_or("", |m| m.as_str());
    Ok((word, chars, text))
}

/// Split a `Tj`/`TJ` operand into text runs.
///
/// Each literal becomes one run. The number before a literal's open
/// parenthesis, optionally followed by whitespace, is that run's adjustment.
/// A missing number means [`DEFAULT_ADJUSTMENT`], and an unreadable one is
/// logged and replaced with the default. Bytes outside literals are otherwise
/// ignored.
pub fn parse_text_runs(operand: &[u8]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut scanner = LiteralScanner::new();
    let mut buffer: Vec<u8> = Vec::new();
    let mut adjustment = 0.0;

    for (i, &b) in operand.iter().enumerate() {
        match scanner.step(b) {
            ScanEvent::Open => {
                adjustment = leading_adjustment(&operand[..i]);
                buffer.clear();
            }
            ScanEvent::Close => {
                if !buffer.is_empty() {
                    runs.push(TextRun::new(std::mem::take(&mut buffer), adjustment));
                    adjustment = 0.0;
                }
            }
            ScanEvent::Escape => {}
            ScanEvent::Byte { byte, inside, .. } => {
                if inside {
                    buffer.push(byte);
                }
            }
        }
    }
    runs
}

fn leading_adjustment(prefix: &[u8]) -> f64 {
    let end = prefix
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let Some(m) = ADJUST_RE.find(&prefix[..end]) else {
        return DEFAULT_ADJUSTMENT;
    };
    let text = String::from_utf8_lossy(m.as_bytes());
    match text.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            log::warn!(
                "unable to parse TJ adjustment '{}', using {}",
                text,
                DEFAULT_ADJUSTMENT
            );
            DEFAULT_ADJUSTMENT
        }
    }
}
