//! x86_64 Fletcher-4 kernel (SSE2 adds, SSSE3 byte shuffle).
//!
//! Each 16-byte block is split into two 2×u64 vectors with
//! `unpack{lo,hi}_epi32` against zero, which zero-extends the words and puts
//! the even word in the low half and the odd word in the high half, matching
//! the lane layout of [`Fletcher4Lanes`].
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. The safe wrappers check the
//! capability probe and fall back to the portable kernel when it is false.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use super::{Fletcher4Lanes, portable};

#[inline]
#[target_feature(enable = "sse2,ssse3")]
unsafe fn compute_sse<const SWAP: bool>(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  let mut a = _mm_load_si128(state.a.as_ptr().cast());
  let mut b = _mm_load_si128(state.b.as_ptr().cast());
  let mut c = _mm_load_si128(state.c.as_ptr().cast());
  let mut d = _mm_load_si128(state.d.as_ptr().cast());

  let zero = _mm_setzero_si128();
  // Reverse the bytes of each 32-bit word.
  let bswap = _mm_set_epi8(12, 13, 14, 15, 8, 9, 10, 11, 4, 5, 6, 7, 0, 1, 2, 3);

  for block in blocks {
    let mut v = _mm_loadu_si128(block.as_ptr().cast());
    if SWAP {
      v = _mm_shuffle_epi8(v, bswap);
    }

    let lo = _mm_unpacklo_epi32(v, zero);
    let hi = _mm_unpackhi_epi32(v, zero);

    a = _mm_add_epi64(a, lo);
    b = _mm_add_epi64(b, a);
    c = _mm_add_epi64(c, b);
    d = _mm_add_epi64(d, c);

    a = _mm_add_epi64(a, hi);
    b = _mm_add_epi64(b, a);
    c = _mm_add_epi64(c, b);
    d = _mm_add_epi64(d, c);
  }

  _mm_store_si128(state.a.as_mut_ptr().cast(), a);
  _mm_store_si128(state.b.as_mut_ptr().cast(), b);
  _mm_store_si128(state.c.as_mut_ptr().cast(), c);
  _mm_store_si128(state.d.as_mut_ptr().cast(), d);
}

/// Safe wrapper for the native-order SSE kernel.
#[inline]
pub fn compute_native(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  if super::is_supported() {
    // SAFETY: the probe confirmed SSE2 and SSSE3; `Fletcher4Lanes` is
    // 16-byte aligned so the aligned slot loads/stores are valid.
    unsafe { compute_sse::<false>(state, blocks) }
  } else {
    portable::compute_native(state, blocks);
  }
}

/// Safe wrapper for the byteswapping SSE kernel.
#[inline]
pub fn compute_byteswap(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  if super::is_supported() {
    // SAFETY: the probe confirmed SSE2 and SSSE3; `Fletcher4Lanes` is
    // 16-byte aligned so the aligned slot loads/stores are valid.
    unsafe { compute_sse::<true>(state, blocks) }
  } else {
    portable::compute_byteswap(state, blocks);
  }
}
