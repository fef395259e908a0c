use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Encoder flag bitmask.
///
/// Bit values follow the conventional JSON-encoder numbering. Bits this crate
/// does not recognize are kept in [`EncodeOptions::bits`] and otherwise
/// ignored.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodeOptions(u32);

impl EncodeOptions {
    /// Escape `<` and `>` as `\u003C` / `\u003E`.
    pub const HEX_TAG: Self = Self(1);
    /// Escape `&` as `\u0026`.
    pub const HEX_AMP: Self = Self(2);
    /// Escape `'` as `\u0027`.
    pub const HEX_APOS: Self = Self(4);
    /// Escape `"` inside strings as `\u0022`.
    pub const HEX_QUOT: Self = Self(8);
    /// Render sequences as objects keyed by index.
    pub const FORCE_OBJECT: Self = Self(16);
    /// Leave `/` unescaped.
    pub const UNESCAPED_SLASHES: Self = Self(64);
    /// Indent output with four spaces per level.
    pub const PRETTY_PRINT: Self = Self(128);
    /// Leave non-ASCII characters unescaped.
    pub const UNESCAPED_UNICODE: Self = Self(256);
    /// Keep `.0` on integral floats.
    pub const PRESERVE_ZERO_FRACTION: Self = Self(1024);

    /// Flags used by [`crate::html_encode`].
    pub const HTML: Self =
        Self(Self::HEX_QUOT.0 | Self::HEX_TAG.0 | Self::HEX_AMP.0 | Self::HEX_APOS.0);

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Wraps a raw bitmask, unrecognized bits included.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns a copy with `other` added.
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns a copy with `other` cleared.
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::UNESCAPED_SLASHES | Self::UNESCAPED_UNICODE
    }
}

impl BitOr for EncodeOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

impl BitOrAssign for EncodeOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for EncodeOptions {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Debug for EncodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodeOptions({:#06x})", self.0)
    }
}
