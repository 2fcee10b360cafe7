//! Scalar reference implementation of Fletcher-4.
//!
//! This is the "source of truth" every lane kernel is checked against. It
//! folds one 32-bit word at a time through the classic recurrence:
//!
//! ```text
//! A += w; B += A; C += B; D += C
//! ```
//!
//! with wrapping 64-bit arithmetic. Words are zero-extended to 64 bits.
//!
//! The module also owns the incremental combine, which lets the hashers run
//! the lane kernels on a fresh state and merge the result into a running
//! checksum.

use super::Fletcher4Cksum;

/// Decode a stored word in host byte order.
#[inline(always)]
#[must_use]
pub const fn native_word(bytes: [u8; 4]) -> u32 {
  u32::from_ne_bytes(bytes)
}

/// Decode a stored word in the opposite byte order to the host.
#[inline(always)]
#[must_use]
pub const fn byteswap_word(bytes: [u8; 4]) -> u32 {
  u32::from_ne_bytes(bytes).swap_bytes()
}

/// Fold a single word into `ck`.
#[inline(always)]
#[must_use]
pub const fn fold_word(ck: Fletcher4Cksum, word: u32) -> Fletcher4Cksum {
  let a = ck.a.wrapping_add(word as u64);
  let b = ck.b.wrapping_add(a);
  let c = ck.c.wrapping_add(b);
  let d = ck.d.wrapping_add(c);
  Fletcher4Cksum { a, b, c, d }
}

#[inline(always)]
pub(crate) fn fold_words(mut ck: Fletcher4Cksum, words: &[[u8; 4]], decode: fn([u8; 4]) -> u32) -> Fletcher4Cksum {
  for &word in words {
    ck = fold_word(ck, decode(word));
  }
  ck
}

/// Continue `seed` over `data` read as native-endian words.
///
/// Trailing bytes that do not form a whole word are ignored.
#[must_use]
pub fn fold_native(seed: Fletcher4Cksum, data: &[u8]) -> Fletcher4Cksum {
  fold_words(seed, data.as_chunks::<4>().0, native_word)
}

/// Continue `seed` over `data` read as byte-swapped words.
///
/// Trailing bytes that do not form a whole word are ignored.
#[must_use]
pub fn fold_byteswap(seed: Fletcher4Cksum, data: &[u8]) -> Fletcher4Cksum {
  fold_words(seed, data.as_chunks::<4>().0, byteswap_word)
}

/// Fletcher-4 of `data` in host word order.
#[must_use]
pub fn fletcher4_native(data: &[u8]) -> Fletcher4Cksum {
  fold_native(Fletcher4Cksum::ZERO, data)
}

/// Fletcher-4 of `data` with every word byte-swapped.
#[must_use]
pub fn fletcher4_byteswap(data: &[u8]) -> Fletcher4Cksum {
  fold_byteswap(Fletcher4Cksum::ZERO, data)
}

/// `n(n+1)/2 mod 2^64`, exact for every `n`.
#[inline]
const fn triangular(n: u64) -> u64 {
  let (x, y) = (n, n.wrapping_add(1));
  if x % 2 == 0 {
    (x / 2).wrapping_mul(y)
  } else {
    x.wrapping_mul(y / 2)
  }
}

/// `n(n+1)(n+2)/6 mod 2^64`, exact for every `n < 2^64 - 2`.
///
/// The division is carried out on the factors before multiplying, so no
/// intermediate product overflows and wraps.
#[inline]
const fn tetrahedral(n: u64) -> u64 {
  let (mut x, mut y, mut z) = (n, n + 1, n + 2);

  if x % 2 == 0 {
    x /= 2;
  } else {
    y /= 2;
  }

  if x % 3 == 0 {
    x /= 3;
  } else if y % 3 == 0 {
    y /= 3;
  } else {
    z /= 3;
  }

  x.wrapping_mul(y).wrapping_mul(z)
}

/// Checksum of `P || S` from the checksums of `P` and `S`.
///
/// `suffix_len` is the length of `S` in bytes. A trailing partial word in `S`
/// counts as one (zero-padded) word. `P` must be a whole number of words.
///
/// Every suffix word is folded after all of `P`, so each one re-adds the prefix
/// sums: with `n` suffix words, `B` gains `n*A_p`, `C` gains `n*B_p + T(n)*A_p`
/// and `D` gains `n*C_p + T(n)*B_p + Te(n)*A_p` (`T`/`Te` are the triangular
/// and tetrahedral numbers).
#[must_use]
pub const fn combine(prefix: Fletcher4Cksum, suffix: Fletcher4Cksum, suffix_len: usize) -> Fletcher4Cksum {
  let c1 = suffix_len.div_ceil(4) as u64;
  let c2 = triangular(c1);
  let c3 = tetrahedral(c1);

  let a = prefix.a.wrapping_add(suffix.a);
  let b = prefix.b.wrapping_add(suffix.b).wrapping_add(c1.wrapping_mul(prefix.a));
  let c = prefix
    .c
    .wrapping_add(suffix.c)
    .wrapping_add(c1.wrapping_mul(prefix.b))
    .wrapping_add(c2.wrapping_mul(prefix.a));
  let d = prefix
    .d
    .wrapping_add(suffix.d)
    .wrapping_add(c1.wrapping_mul(prefix.c))
    .wrapping_add(c2.wrapping_mul(prefix.b))
    .wrapping_add(c3.wrapping_mul(prefix.a));

  Fletcher4Cksum { a, b, c, d }
}
