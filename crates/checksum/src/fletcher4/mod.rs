//! Fletcher-4 checksum.
//!
//! Fletcher-4 keeps four 64-bit running sums over a stream of 32-bit words:
//!
//! ```text
//! A += w; B += A; C += B; D += C
//! ```
//!
//! with wrapping arithmetic. The checksum is the final `(A, B, C, D)`.
//!
//! # Layers
//!
//! - [`reference`]: the scalar recurrence, one word at a time
//! - [`Fletcher4Lanes`]: two interleaved lanes over 16-byte blocks, recombined
//!   by [`Fletcher4Lanes::fini`]
//! - [`ops`]: the lane kernels (portable, SSE, NEON) as operation records
//! - [`Fletcher4`] / [`Fletcher4Byteswap`]: streaming hashers over arbitrary
//!   byte lengths, built on the two above
//!
//! Word order is explicit. [`Fletcher4`] reads words in host byte order and
//! [`Fletcher4Byteswap`] reverses each word first. For data with a fixed
//! on-disk byte order use [`Fletcher4Le`] or [`Fletcher4Be`].

use core::fmt;

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
mod aarch64;
pub mod config;
mod lanes;
pub mod ops;
mod portable;
#[cfg(test)]
mod proptests;
pub mod reference;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use config::{Fletcher4Config, Fletcher4Force};
pub use lanes::Fletcher4Lanes;
pub use ops::{Fletcher4Fn, Fletcher4Ops};

/// Kernel name reported when the scalar fold handles an input.
pub const REFERENCE_KERNEL: &str = "reference/scalar";

// ─────────────────────────────────────────────────────────────────────────────
// Checksum value
// ─────────────────────────────────────────────────────────────────────────────

/// A Fletcher-4 checksum: the four running sums.
///
/// Displays as the four sums in lowercase hex separated by `:`.
///
/// ```
/// use checksum::Fletcher4Cksum;
///
/// let ck = Fletcher4Cksum::new(0x1f, 0x2a, 0, 0xdead);
/// assert_eq!(ck.to_string(), "1f:2a:0:dead");
/// assert_eq!(Fletcher4Cksum::from_le_bytes(ck.to_le_bytes()), ck);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fletcher4Cksum {
  pub a: u64,
  pub b: u64,
  pub c: u64,
  pub d: u64,
}

impl Fletcher4Cksum {
  /// All four sums zero (checksum of the empty input).
  pub const ZERO: Self = Self::new(0, 0, 0, 0);

  /// Serialized size in bytes.
  pub const SIZE: usize = 32;

  #[inline]
  #[must_use]
  pub const fn new(a: u64, b: u64, c: u64, d: u64) -> Self {
    Self { a, b, c, d }
  }

  #[inline]
  #[must_use]
  pub const fn from_words(words: [u64; 4]) -> Self {
    let [a, b, c, d] = words;
    Self { a, b, c, d }
  }

  /// `[a, b, c, d]`.
  #[inline]
  #[must_use]
  pub const fn words(&self) -> [u64; 4] {
    [self.a, self.b, self.c, self.d]
  }

  /// Little-endian serialization, `a` first.
  #[must_use]
  pub fn to_le_bytes(&self) -> [u8; 32] {
    self.to_bytes(u64::to_le_bytes)
  }

  /// Big-endian serialization, `a` first.
  #[must_use]
  pub fn to_be_bytes(&self) -> [u8; 32] {
    self.to_bytes(u64::to_be_bytes)
  }

  #[must_use]
  pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
    Self::from_bytes(&bytes, u64::from_le_bytes)
  }

  #[must_use]
  pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
    Self::from_bytes(&bytes, u64::from_be_bytes)
  }

  fn to_bytes(&self, encode: fn(u64) -> [u8; 8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let (slots, _) = out.as_chunks_mut::<8>();
    for (slot, word) in slots.iter_mut().zip(self.words()) {
      *slot = encode(word);
    }
    out
  }

  fn from_bytes(bytes: &[u8; 32], decode: fn([u8; 8]) -> u64) -> Self {
    let mut words = [0u64; 4];
    let (slots, _) = bytes.as_chunks::<8>();
    for (word, slot) in words.iter_mut().zip(slots) {
      *word = decode(*slot);
    }
    Self::from_words(words)
  }
}

impl fmt::Display for Fletcher4Cksum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:x}:{:x}:{:x}:{:x}", self.a, self.b, self.c, self.d)
  }
}

impl fmt::LowerHex for Fletcher4Cksum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capability probe and selection
// ─────────────────────────────────────────────────────────────────────────────

/// Whether the vector lane kernel can run on this host.
///
/// - x86_64: SSE2 and SSSE3
/// - aarch64 (little-endian): NEON
/// - everything else: `false` (the portable lane kernel is used)
///
/// The answer comes from the process-wide capability cache, so it is the same
/// on every call unless a capabilities override is installed.
#[inline]
#[must_use]
pub fn is_supported() -> bool {
  let caps = platform::caps();
  if cfg!(target_arch = "x86_64") {
    caps.has(platform::caps::x86::SIMD128_READY)
  } else if cfg!(all(target_arch = "aarch64", target_endian = "little")) {
    caps.has(platform::caps::aarch64::SIMD128_READY)
  } else {
    false
  }
}

/// Whether an `update` of `len` bytes goes through the lane kernels.
#[inline]
fn uses_lanes(cfg: &Fletcher4Config, len: usize) -> bool {
  if len < Fletcher4Lanes::BLOCK_SIZE {
    return false;
  }
  match cfg.effective_force {
    Fletcher4Force::Reference => false,
    Fletcher4Force::Portable | Fletcher4Force::Simd => true,
    Fletcher4Force::Auto => len >= cfg.simd_threshold,
  }
}

/// Name of the kernel the hashers use for large inputs.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  if config::get().effective_force == Fletcher4Force::Reference {
    REFERENCE_KERNEL
  } else {
    ops::selected().name
  }
}

/// Name of the kernel a single `update` of `len` bytes runs on.
#[inline]
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  if uses_lanes(&config::get(), len) {
    ops::selected().name
  } else {
    REFERENCE_KERNEL
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming core
// ─────────────────────────────────────────────────────────────────────────────

/// How stored bytes map to 32-bit words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordOrder {
  /// Host byte order.
  Native,
  /// Host byte order, then byte-reversed.
  Byteswap,
}

impl WordOrder {
  #[inline]
  fn decoder(self) -> fn([u8; 4]) -> u32 {
    match self {
      Self::Native => reference::native_word,
      Self::Byteswap => reference::byteswap_word,
    }
  }

  #[inline]
  fn lane_fn(self, ops: &Fletcher4Ops) -> Fletcher4Fn {
    match self {
      Self::Native => ops.compute_native,
      Self::Byteswap => ops.compute_byteswap,
    }
  }
}

/// Fold the whole words of `data` into `state`.
///
/// Bulk blocks run through a fresh lane state and are merged with the
/// incremental combine; the sub-block remainder folds through the scalar
/// recurrence.
pub(crate) fn absorb(state: Fletcher4Cksum, data: &[u8], order: WordOrder) -> Fletcher4Cksum {
  let decode = order.decoder();
  if !uses_lanes(&config::get(), data.len()) {
    return reference::fold_words(state, data.as_chunks::<4>().0, decode);
  }

  let (blocks, rest) = data.as_chunks::<16>();
  let kernel = ops::selected();
  let mut lanes = Fletcher4Lanes::new();
  (order.lane_fn(kernel))(&mut lanes, blocks);
  let bulk = (kernel.fini)(&lanes);

  let state = reference::combine(state, bulk, data.len() - rest.len());
  reference::fold_words(state, rest.as_chunks::<4>().0, decode)
}

/// Scalar fold of a zero-padded trailing word.
#[inline]
pub(crate) fn fold_pending(state: Fletcher4Cksum, pending: [u8; 4], order: WordOrder) -> Fletcher4Cksum {
  reference::fold_word(state, (order.decoder())(pending))
}

#[cfg(feature = "diag")]
pub(crate) fn diag_fletcher4(len: usize) -> crate::diag::Fletcher4SelectionDiag {
  use crate::diag::SelectionReason;

  let cfg = config::get();
  let reason = if len < Fletcher4Lanes::BLOCK_SIZE {
    SelectionReason::BelowSmallThreshold
  } else if cfg.effective_force != Fletcher4Force::Auto {
    SelectionReason::Forced
  } else if len < cfg.simd_threshold {
    SelectionReason::BelowSimdThreshold
  } else {
    SelectionReason::Auto
  };

  crate::diag::Fletcher4SelectionDiag {
    len,
    reason,
    requested_force: cfg.requested_force,
    effective_force: cfg.effective_force,
    selected_kernel: kernel_name_for_len(len),
    simd_threshold: cfg.simd_threshold,
    simd_supported: is_supported(),
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashers
// ─────────────────────────────────────────────────────────────────────────────

define_fletcher4_type! {
  /// Fletcher-4 over host-byte-order words.
  ///
  /// Accepts any input length. A trailing partial word is zero-padded at
  /// [`finalize`](crate::Checksum::finalize).
  ///
  /// ```
  /// use checksum::{Checksum, Fletcher4};
  ///
  /// let mut hasher = Fletcher4::new();
  /// hasher.update(b"12345");
  /// hasher.update(b"6789abc");
  /// assert_eq!(hasher.finalize(), Fletcher4::checksum(b"123456789abc"));
  /// ```
  pub struct Fletcher4 {
    order: WordOrder::Native,
  }
}

define_fletcher4_type! {
  /// Fletcher-4 over byte-reversed words.
  ///
  /// Equal to [`Fletcher4`] over a copy of the input with each 32-bit word
  /// byte-reversed.
  pub struct Fletcher4Byteswap {
    order: WordOrder::Byteswap,
  }
}

/// Fletcher-4 over little-endian words.
#[cfg(target_endian = "little")]
pub type Fletcher4Le = Fletcher4;
/// Fletcher-4 over little-endian words.
#[cfg(target_endian = "big")]
pub type Fletcher4Le = Fletcher4Byteswap;

/// Fletcher-4 over big-endian words.
#[cfg(target_endian = "little")]
pub type Fletcher4Be = Fletcher4Byteswap;
/// Fletcher-4 over big-endian words.
#[cfg(target_endian = "big")]
pub type Fletcher4Be = Fletcher4;

#[cfg(feature = "alloc")]
define_buffered_fletcher4! {
  /// [`Fletcher4`] that collects small updates until they fill the lane
  /// threshold.
  pub struct BufferedFletcher4<Fletcher4> {
    buffer_size: 4096,
  }
}

#[cfg(feature = "alloc")]
define_buffered_fletcher4! {
  /// [`Fletcher4Byteswap`] that collects small updates until they fill the
  /// lane threshold.
  pub struct BufferedFletcher4Byteswap<Fletcher4Byteswap> {
    buffer_size: 4096,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
