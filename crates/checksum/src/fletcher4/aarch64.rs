//! aarch64 Fletcher-4 kernel (NEON).
//!
//! Little-endian only: a 16-byte load viewed as `uint32x4_t` yields the block's
//! words in stream order, so `vmovl_u32` on the low half gives the (even, odd)
//! pair for the first step and `vmovl_high_u32` the pair for the second.
//!
//! # Safety
//!
//! Uses `unsafe` for NEON intrinsics. The safe wrappers check the capability
//! probe and fall back to the portable kernel when it is false.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::*;

use super::{Fletcher4Lanes, portable};

#[inline]
#[target_feature(enable = "neon")]
unsafe fn compute_neon<const SWAP: bool>(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  let mut a = vld1q_u64(state.a.as_ptr());
  let mut b = vld1q_u64(state.b.as_ptr());
  let mut c = vld1q_u64(state.c.as_ptr());
  let mut d = vld1q_u64(state.d.as_ptr());

  for block in blocks {
    let mut bytes = vld1q_u8(block.as_ptr());
    if SWAP {
      bytes = vrev32q_u8(bytes);
    }
    let words = vreinterpretq_u32_u8(bytes);

    let lo = vmovl_u32(vget_low_u32(words));
    let hi = vmovl_high_u32(words);

    a = vaddq_u64(a, lo);
    b = vaddq_u64(b, a);
    c = vaddq_u64(c, b);
    d = vaddq_u64(d, c);

    a = vaddq_u64(a, hi);
    b = vaddq_u64(b, a);
    c = vaddq_u64(c, b);
    d = vaddq_u64(d, c);
  }

  vst1q_u64(state.a.as_mut_ptr(), a);
  vst1q_u64(state.b.as_mut_ptr(), b);
  vst1q_u64(state.c.as_mut_ptr(), c);
  vst1q_u64(state.d.as_mut_ptr(), d);
}

/// Safe wrapper for the native-order NEON kernel.
#[inline]
pub fn compute_native(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  if super::is_supported() {
    // SAFETY: the probe confirmed NEON; loads and stores stay within the
    // `[u64; 2]` slots and the 16-byte blocks.
    unsafe { compute_neon::<false>(state, blocks) }
  } else {
    portable::compute_native(state, blocks);
  }
}

/// Safe wrapper for the byteswapping NEON kernel.
#[inline]
pub fn compute_byteswap(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  if super::is_supported() {
    // SAFETY: the probe confirmed NEON; loads and stores stay within the
    // `[u64; 2]` slots and the 16-byte blocks.
    unsafe { compute_neon::<true>(state, blocks) }
  } else {
    portable::compute_byteswap(state, blocks);
  }
}
