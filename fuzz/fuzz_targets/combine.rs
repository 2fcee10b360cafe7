//! Fuzz target for Fletcher-4 combine.
//!
//! The checksum of `A || B` derived from the parts must match the direct
//! computation whenever `A` is a whole number of words.

#![no_main]

use arbitrary::Arbitrary;
use checksum::{Checksum, ChecksumCombine, Fletcher4, Fletcher4Byteswap};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split: usize,
}

fuzz_target!(|input: Input| {
  check::<Fletcher4>(&input.data, input.split);
  check::<Fletcher4Byteswap>(&input.data, input.split);
});

fn check<C: ChecksumCombine>(data: &[u8], split: usize) {
  let split = split.min(data.len()) & !3;
  let (a, b) = data.split_at(split);
  let combined = C::combine(C::checksum(a), C::checksum(b), b.len());
  assert_eq!(combined, C::checksum(data), "combine mismatch at split={split}, len={}", data.len());
}
