//! JSON serialization flags as a bitmask.

use std::ops::{BitOr, BitOrAssign};

/// Bitmask of JSON serialization flags for [`JsonView`](crate::JsonView).
///
/// Compose with `|`:
///
/// ```rust
/// use miru::JsonOptions;
///
/// let opts = JsonOptions::PRETTY | JsonOptions::ESCAPE_NON_ASCII;
/// assert!(opts.contains(JsonOptions::PRETTY));
/// ```
///
/// Unknown bits are carried but ignored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct JsonOptions(u32);

impl JsonOptions {
    /// Pretty-printed output (two-space indent).
    pub const PRETTY: Self = Self(1);

    /// Escape every non-ASCII character as `\uXXXX`. serde_json emits UTF-8
    /// unescaped; set this when a downstream consumer chokes on raw unicode.
    pub const ESCAPE_NON_ASCII: Self = Self(1 << 1);

    /// Recursively coerce strings that parse as numbers (`"42"`, `"1.5"`)
    /// into JSON numbers before serialization.
    pub const NUMERIC_CHECK: Self = Self(1 << 2);

    /// No flags set. This is also the `Default`.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
}

impl BitOr for JsonOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for JsonOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_contains_nothing() {
        assert!(!JsonOptions::empty().contains(JsonOptions::PRETTY));
        assert!(JsonOptions::empty().contains(JsonOptions::empty()));
    }

    #[test]
    fn or_composes_flags() {
        let mut opts = JsonOptions::PRETTY | JsonOptions::NUMERIC_CHECK;
        assert!(opts.contains(JsonOptions::PRETTY));
        assert!(opts.contains(JsonOptions::NUMERIC_CHECK));
        assert!(!opts.contains(JsonOptions::ESCAPE_NON_ASCII));

        opts |= JsonOptions::ESCAPE_NON_ASCII;
        assert!(opts.contains(JsonOptions::ESCAPE_NON_ASCII));
    }

    #[test]
    fn unknown_bits_round_trip() {
        let opts = JsonOptions::from_bits(1 << 30 | 1);
        assert!(opts.contains(JsonOptions::PRETTY));
        assert_eq!(opts.bits(), 1 << 30 | 1);
    }
}
