//! CPU capability representation.
//!
//! [`Caps`] answers "what instructions can I legally run on this machine?".
//! It is a 256-bit bitset; each architecture owns a 64-bit window so the
//! constants of different targets never collide:
//!
//! - Bits 0-63: x86/x86_64
//! - Bits 64-127: aarch64
//! - Bits 128-255: reserved
//!
//! # Usage
//!
//! ```
//! use platform::caps::{Caps, x86};
//!
//! let caps = platform::caps();
//! if caps.has(x86::SIMD128_READY) {
//!   // SSE2 + SSSE3 kernel
//! }
//! # let _ = Caps::NONE;
//! ```

/// CPU capabilities: a 256-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 4]);

impl Caps {
  /// Empty capability set.
  pub const NONE: Self = Self([0; 4]);

  /// Create a capability set from raw words.
  #[cfg(test)]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 4]) -> Self {
    Self(words)
  }

  /// Access the raw underlying words.
  #[cfg(test)]
  #[inline]
  #[must_use]
  pub const fn as_raw(&self) -> &[u64; 4] {
    &self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    let [r0, r1, r2, r3] = required.0;
    let [s0, s1, s2, s3] = self.0;
    (s0 & r0) == r0 && (s1 & r1) == r1 && (s2 & r2) == r2 && (s3 & r3) == r3
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    let [a0, a1, a2, a3] = self.0;
    let [b0, b1, b2, b3] = other.0;
    Self([a0 | b0, a1 | b1, a2 | b2, a3 | b3])
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    let [a0, a1, a2, a3] = self.0;
    let [b0, b1, b2, b3] = other.0;
    Self([a0 & b0, a1 & b1, a2 & b2, a3 & b3])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    let [w0, w1, w2, w3] = self.0;
    (w0 | w1 | w2 | w3) == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    let [w0, w1, w2, w3] = self.0;
    w0.count_ones() + w1.count_ones() + w2.count_ones() + w3.count_ones()
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    let mask = 1u64 << (bit % 64);
    match bit / 64 {
      0 => Self([mask, 0, 0, 0]),
      1 => Self([0, mask, 0, 0]),
      2 => Self([0, 0, mask, 0]),
      _ => Self([0, 0, 0, mask]),
    }
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    self.has(Self::bit(bit))
  }

  /// Iterate over the names of the features present for the current target.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    NAMED.iter().filter(move |(caps, _)| self.has(*caps)).map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.feature_names()).finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  Powerpc64,
  Wasm32,
  #[default]
  Other,
}

impl Arch {
  /// Architecture of the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else if cfg!(target_arch = "powerpc64") {
      Self::Powerpc64
    } else if cfg!(target_arch = "wasm32") {
      Self::Wasm32
    } else {
      Self::Other
    }
  }

  /// Human-readable name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Powerpc64 => "powerpc64",
      Self::Wasm32 => "wasm32",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features (bits 0-63)
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features.
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  pub const SSSE3: Caps = Caps::bit(1);

  /// 128-bit integer SIMD with byte shuffles (two-lane Fletcher kernels).
  pub const SIMD128_READY: Caps = SSE2.union(SSSE3);
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 64-127)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features.
pub mod aarch64 {
  use super::Caps;

  /// Advanced SIMD. Baseline on every AArch64 core that runs Linux/macOS.
  pub const NEON: Caps = Caps::bit(64);

  pub const SIMD128_READY: Caps = NEON;
}

const NAMED: &[(Caps, &str)] = &[
  (x86::SSE2, "SSE2"),
  (x86::SSSE3, "SSSE3"),
  (aarch64::NEON, "NEON"),
];
