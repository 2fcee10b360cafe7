//! Two-lane Fletcher-4 accumulator.
//!
//! The stream of 32-bit words is split across two independent lanes: lane 0
//! folds the even-indexed words, lane 1 the odd-indexed ones. Each lane runs
//! its own `A/B/C/D` recurrence, which lets vector kernels advance both lanes
//! with a single 2×64-bit add per slot. [`Fletcher4Lanes::fini`] recombines
//! the lanes into the value the scalar recurrence produces for the whole
//! stream.
//!
//! # Recombination
//!
//! With `k` word pairs folded, lane sums relate to the scalar sums by
//!
//! ```text
//! A = A0 + A1
//! B = 2·B0 + 2·B1 − A1
//! C = 4·C0 − B0 + 4·C1 − 3·B1
//! D = 8·D0 − 4·C0 + 8·D1 − 8·C1 + B1
//! ```
//!
//! all modulo 2^64. The identities are linear, so they hold under wrapping
//! arithmetic for any number of blocks.

use traits::UnalignedLength;

use super::{Fletcher4Cksum, ops};

/// Per-lane accumulator state for Fletcher-4.
///
/// Each slot holds `[lane0, lane1]`. The layout is 16-byte aligned so vector
/// kernels can move a slot in a single load/store.
///
/// # Examples
///
/// ```
/// use checksum::{Fletcher4Cksum, Fletcher4Lanes};
///
/// let data = [0x11u8; 64];
/// let mut lanes = Fletcher4Lanes::new();
/// lanes.compute_native(&data);
/// let ck: Fletcher4Cksum = lanes.fini();
/// assert_eq!(ck, checksum::fletcher4::reference::fletcher4_native(&data));
/// ```
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fletcher4Lanes {
  pub(crate) a: [u64; 2],
  pub(crate) b: [u64; 2],
  pub(crate) c: [u64; 2],
  pub(crate) d: [u64; 2],
}

impl Fletcher4Lanes {
  /// Bytes consumed per iteration (two words per lane).
  pub const BLOCK_SIZE: usize = 16;

  /// All-zero state.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      a: [0; 2],
      b: [0; 2],
      c: [0; 2],
      d: [0; 2],
    }
  }

  /// Build a state from raw lane values `[lane0, lane1]` per slot.
  #[inline]
  #[must_use]
  pub const fn from_lanes(a: [u64; 2], b: [u64; 2], c: [u64; 2], d: [u64; 2]) -> Self {
    Self { a, b, c, d }
  }

  /// Raw lane values, `[a, b, c, d]`.
  #[inline]
  #[must_use]
  pub const fn lanes(&self) -> [[u64; 2]; 4] {
    [self.a, self.b, self.c, self.d]
  }

  /// Zero every lane.
  #[inline]
  pub fn init(&mut self) {
    *self = Self::new();
  }

  /// Fold `data` into the lanes, reading words in host byte order.
  ///
  /// `data.len()` must be a multiple of [`Self::BLOCK_SIZE`]. A trailing
  /// partial block is ignored in release builds and trips a debug assertion
  /// otherwise; use [`try_compute_native`](Self::try_compute_native) for a
  /// checked call.
  #[inline]
  pub fn compute_native(&mut self, data: &[u8]) {
    let (blocks, rest) = data.as_chunks::<16>();
    debug_assert!(rest.is_empty(), "Fletcher-4 lane input must be a multiple of 16 bytes");
    (ops::selected().compute_native)(self, blocks);
  }

  /// Fold `data` into the lanes, byte-reversing every word first.
  ///
  /// Same length contract as [`compute_native`](Self::compute_native).
  #[inline]
  pub fn compute_byteswap(&mut self, data: &[u8]) {
    let (blocks, rest) = data.as_chunks::<16>();
    debug_assert!(rest.is_empty(), "Fletcher-4 lane input must be a multiple of 16 bytes");
    (ops::selected().compute_byteswap)(self, blocks);
  }

  /// Checked [`compute_native`](Self::compute_native).
  ///
  /// # Errors
  ///
  /// Returns [`UnalignedLength`] and leaves the state untouched when
  /// `data.len()` is not a multiple of 16.
  #[inline]
  pub fn try_compute_native(&mut self, data: &[u8]) -> Result<(), UnalignedLength> {
    check_len(data)?;
    self.compute_native(data);
    Ok(())
  }

  /// Checked [`compute_byteswap`](Self::compute_byteswap).
  ///
  /// # Errors
  ///
  /// Returns [`UnalignedLength`] and leaves the state untouched when
  /// `data.len()` is not a multiple of 16.
  #[inline]
  pub fn try_compute_byteswap(&mut self, data: &[u8]) -> Result<(), UnalignedLength> {
    check_len(data)?;
    self.compute_byteswap(data);
    Ok(())
  }

  /// Recombine the lanes into the checksum of everything folded so far.
  ///
  /// Does not modify the state.
  #[inline]
  #[must_use]
  pub const fn fini(&self) -> Fletcher4Cksum {
    let [a0, a1] = self.a;
    let [b0, b1] = self.b;
    let [c0, c1] = self.c;
    let [d0, d1] = self.d;

    let a = a0.wrapping_add(a1);
    let b = b0.wrapping_mul(2).wrapping_add(b1.wrapping_mul(2)).wrapping_sub(a1);
    let c = c0
      .wrapping_mul(4)
      .wrapping_sub(b0)
      .wrapping_add(c1.wrapping_mul(4))
      .wrapping_sub(b1.wrapping_mul(3));
    let d = d0
      .wrapping_mul(8)
      .wrapping_sub(c0.wrapping_mul(4))
      .wrapping_add(d1.wrapping_mul(8))
      .wrapping_sub(c1.wrapping_mul(8))
      .wrapping_add(b1);

    Fletcher4Cksum { a, b, c, d }
  }
}

#[inline]
fn check_len(data: &[u8]) -> Result<(), UnalignedLength> {
  if data.len() % Fletcher4Lanes::BLOCK_SIZE == 0 {
    Ok(())
  } else {
    Err(UnalignedLength::new(data.len(), Fletcher4Lanes::BLOCK_SIZE))
  }
}
