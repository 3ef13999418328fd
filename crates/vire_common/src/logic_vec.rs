//! Packed constant vectors of 4-state logic values.

use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of logic values packed per `u64` word (2 bits each).
const VALUES_PER_WORD: u32 = 32;

/// A constant bit-vector, index 0 being the least significant bit.
///
/// This is the payload of constant expressions and of constant devices in
/// the netlist. Each value occupies 2 bits of a `u64` word.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicVec {
    width: u32,
    data: Vec<u64>,
}

impl LogicVec {
    /// Creates an all-zero vector of `width` bits.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            data: vec![0; word_count(width)],
        }
    }

    /// Alias of [`LogicVec::new`] used where the intent is a zero pad.
    pub fn zeros(width: u32) -> Self {
        Self::new(width)
    }

    /// Returns the number of bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Gets the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let word = self.data[(index / VALUES_PER_WORD) as usize];
        Logic::from_bits(word >> ((index % VALUES_PER_WORD) * 2))
    }

    /// Sets the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        assert!(
            index < self.width,
            "index {index} out of bounds for width {}",
            self.width
        );
        let slot = &mut self.data[(index / VALUES_PER_WORD) as usize];
        let offset = (index % VALUES_PER_WORD) * 2;
        *slot = (*slot & !(0b11u64 << offset)) | ((value as u64) << offset);
    }

    /// Builds a vector from the low `width` bits of `value`.
    pub fn from_u64(value: u64, width: u32) -> Self {
        let mut v = Self::new(width);
        for i in 0..width.min(64) {
            if (value >> i) & 1 != 0 {
                v.set(i, Logic::One);
            }
        }
        v
    }

    /// Returns the unsigned value if every bit is definite and the width fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.width > 64 {
            return None;
        }
        let mut result = 0u64;
        for i in 0..self.width {
            match self.get(i) {
                Logic::Zero => {}
                Logic::One => result |= 1 << i,
                Logic::X | Logic::Z => return None,
            }
        }
        Some(result)
    }

    /// Returns the two's-complement value when every bit is definite.
    ///
    /// Unsigned vectors wider than 63 bits yield `None`.
    pub fn to_i64(&self, signed: bool) -> Option<i64> {
        let raw = self.to_u64()?;
        if !signed || self.width == 0 {
            return i64::try_from(raw).ok();
        }
        if self.width >= 64 {
            return Some(raw as i64);
        }
        let sign = 1u64 << (self.width - 1);
        if raw & sign != 0 {
            Some(raw as i64 - (1i64 << self.width))
        } else {
            Some(raw as i64)
        }
    }

    /// Returns `true` if no bit is `X` or `Z`.
    pub fn is_definite(&self) -> bool {
        (0..self.width).all(|i| self.get(i).is_definite())
    }

    /// Returns `true` if every bit is `Zero`.
    pub fn is_all_zero(&self) -> bool {
        (0..self.width).all(|i| self.get(i) == Logic::Zero)
    }

    /// Numeric value as a real number.
    ///
    /// Bits that are not `One` count as zero. When `signed` is set and the
    /// most significant bit is `One`, the value is negative.
    pub fn as_f64(&self, signed: bool) -> f64 {
        let mut value = 0.0f64;
        let mut weight = 1.0f64;
        for i in 0..self.width {
            if self.get(i) == Logic::One {
                value += weight;
            }
            weight *= 2.0;
        }
        if signed && self.width > 0 && self.get(self.width - 1) == Logic::One {
            value -= weight;
        }
        value
    }

    /// Parses a string such as `"10xz"`; the leftmost character is the MSB.
    pub fn from_binary_str(s: &str) -> Option<Self> {
        let width = u32::try_from(s.chars().count()).ok()?;
        let mut v = Self::new(width);
        for (i, c) in s.chars().rev().enumerate() {
            v.set(i as u32, Logic::from_char(c)?);
        }
        Some(v)
    }
}

fn word_count(width: u32) -> usize {
    width.div_ceil(VALUES_PER_WORD) as usize
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'b", self.width)?;
        for i in (0..self.width).rev() {
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec({self})")
    }
}
