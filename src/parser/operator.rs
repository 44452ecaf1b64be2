//! Text operator mnemonics.

use std::fmt;

/// Operators recognized inside a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextOperator {
    /// Td - move to the start of the next line
    MoveText,
    /// TD - move to the next line and set leading
    MoveTextSetLeading,
    /// Tm - set text and line matrices
    SetMatrix,
    /// Tj - show a string
    ShowText,
    /// TJ - show strings with individual adjustments
    ShowTextAdjusted,
    /// T* - move to the start of the next line using leading
    NextLine,
    /// TL - set leading
    SetLeading,
    /// Tc - set char spacing
    SetCharSpacing,
    /// Tw - set word spacing
    SetWordSpacing,
    /// Tz - set horizontal scale percentage
    SetHorizontalScale,
    /// Tf - select font and size
    SetFont,
    /// ' - next line, then show a string
    NextLineShowText,
    /// " - set spacing, next line, then show a string
    NextLineSpacingShowText,
    /// Tr - set render mode (ignored)
    SetRenderMode,
    /// Ts - set rise (ignored)
    SetRise,
}

impl TextOperator {
    /// Look up an operator from its mnemonic bytes.
    pub fn from_mnemonic(mnemonic: &[u8]) -> Option<Self> {
        let op = match mnemonic {
            b"Td" => TextOperator::MoveText,
            b"TD" => TextOperator::MoveTextSetLeading,
            b"Tm" => TextOperator::SetMatrix,
            b"Tj" => TextOperator::ShowText,
            b"TJ" => TextOperator::ShowTextAdjusted,
            b"T*" => TextOperator::NextLine,
            b"TL" => TextOperator::SetLeading,
            b"Tc" => TextOperator::SetCharSpacing,
            b"Tw" => TextOperator::SetWordSpacing,
            b"Tz" => TextOperator::SetHorizontalScale,
            b"Tf" => TextOperator::SetFont,
            b"'" => TextOperator::NextLineShowText,
            b"\"" => TextOperator::NextLineSpacingShowText,
            b"Tr" => TextOperator::SetRenderMode,
            b"Ts" => TextOperator::SetRise,
            _ => return None,
        };
        Some(op)
    }

    /// The operator's mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            TextOperator::MoveText => "Td",
            TextOperator::MoveTextSetLeading => "TD",
            TextOperator::SetMatrix => "Tm",
            TextOperator::ShowText => "Tj",
            TextOperator::ShowTextAdjusted => "TJ",
            TextOperator::NextLine => "T*",
            TextOperator::SetLeading => "TL",
            TextOperator::SetCharSpacing => "Tc",
            TextOperator::SetWordSpacing => "Tw",
            TextOperator::SetHorizontalScale => "Tz",
            TextOperator::SetFont => "Tf",
            TextOperator::NextLineShowText => "'",
            TextOperator::NextLineSpacingShowText => "\"",
            TextOperator::SetRenderMode => "Tr",
            TextOperator::SetRise => "Ts",
        }
    }

    /// Operators that are recognized but have no effect on placement.
    pub fn is_ignored(&self) -> bool {
        matches!(self, TextOperator::SetRenderMode | TextOperator::SetRise)
    }

    /// Operators that emit a show operation.
    pub fn shows_text(&self) -> bool {
        matches!(
            self,
            TextOperator::ShowText
                | TextOperator::ShowTextAdjusted
                | TextOperator::NextLineShowText
                | TextOperator::NextLineSpacingShowText
        )
    }
}

impl fmt::Display for TextOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
