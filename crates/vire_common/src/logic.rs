//! Four-state logic values carried by constant devices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single Verilog logic value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Driven low.
    Zero = 0,
    /// Driven high.
    One = 1,
    /// Unknown.
    X = 2,
    /// High impedance.
    Z = 3,
}

impl Logic {
    /// Parses `0`, `1`, `x`/`X` or `z`/`Z`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns `true` for `Zero` and `One`.
    pub fn is_definite(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }

    pub(crate) fn from_bits(bits: u64) -> Self {
        match bits & 0b11 {
            0 => Logic::Zero,
            1 => Logic::One,
            2 => Logic::X,
            _ => Logic::Z,
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        };
        write!(f, "{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chars() {
        assert_eq!(Logic::from_char('0'), Some(Logic::Zero));
        assert_eq!(Logic::from_char('1'), Some(Logic::One));
        assert_eq!(Logic::from_char('X'), Some(Logic::X));
        assert_eq!(Logic::from_char('z'), Some(Logic::Z));
        assert_eq!(Logic::from_char('2'), None);
    }

    #[test]
    fn definite_values() {
        assert!(Logic::Zero.is_definite());
        assert!(Logic::One.is_definite());
        assert!(!Logic::X.is_definite());
        assert!(!Logic::Z.is_definite());
    }

    #[test]
    fn bit_decoding_matches_repr() {
        for v in [Logic::Zero, Logic::One, Logic::X, Logic::Z] {
            assert_eq!(Logic::from_bits(v as u64), v);
        }
    }
}
