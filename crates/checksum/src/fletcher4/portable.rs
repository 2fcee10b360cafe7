//! Portable two-lane kernel.
//!
//! Runs the lane model in general-purpose registers. This is the fallback on
//! targets without a vector kernel and whenever the capability probe is false.

use super::Fletcher4Lanes;

#[derive(Clone, Copy)]
struct Lane {
  a: u64,
  b: u64,
  c: u64,
  d: u64,
}

impl Lane {
  #[inline(always)]
  fn fold(&mut self, word: u32) {
    self.a = self.a.wrapping_add(u64::from(word));
    self.b = self.b.wrapping_add(self.a);
    self.c = self.c.wrapping_add(self.b);
    self.d = self.d.wrapping_add(self.c);
  }
}

#[inline(always)]
fn decode<const SWAP: bool>(bytes: [u8; 4]) -> u32 {
  let w = u32::from_ne_bytes(bytes);
  if SWAP { w.swap_bytes() } else { w }
}

#[inline]
fn compute<const SWAP: bool>(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  let [a0, a1] = state.a;
  let [b0, b1] = state.b;
  let [c0, c1] = state.c;
  let [d0, d1] = state.d;
  let mut even = Lane { a: a0, b: b0, c: c0, d: d0 };
  let mut odd = Lane { a: a1, b: b1, c: c1, d: d1 };

  // A block is two (even, odd) word pairs.
  let (pairs, _) = blocks.as_flattened().as_chunks::<8>();
  for &[e0, e1, e2, e3, o0, o1, o2, o3] in pairs {
    even.fold(decode::<SWAP>([e0, e1, e2, e3]));
    odd.fold(decode::<SWAP>([o0, o1, o2, o3]));
  }

  state.a = [even.a, odd.a];
  state.b = [even.b, odd.b];
  state.c = [even.c, odd.c];
  state.d = [even.d, odd.d];
}

/// Native-order portable kernel.
pub fn compute_native(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  compute::<false>(state, blocks);
}

/// Byteswapping portable kernel.
pub fn compute_byteswap(state: &mut Fletcher4Lanes, blocks: &[[u8; 16]]) {
  compute::<true>(state, blocks);
}
