extern crate std;

use std::vec::Vec;

use proptest::prelude::*;

use super::*;
use crate::{Checksum, ChecksumCombine};

fn blocks_of(data: &[u8]) -> &[u8] {
  data.as_chunks::<16>().0.as_flattened()
}

fn swap_words(data: &[u8]) -> Vec<u8> {
  data.as_chunks::<4>().0.iter().flat_map(|w| u32::from_ne_bytes(*w).swap_bytes().to_ne_bytes()).collect()
}

proptest! {
  #[test]
  fn lanes_match_reference(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    let bulk = blocks_of(&data);
    let mut lanes = Fletcher4Lanes::new();
    lanes.compute_native(bulk);
    prop_assert_eq!(lanes.fini(), reference::fletcher4_native(bulk));
  }

  #[test]
  fn byteswap_equals_native_over_swapped_copy(data in proptest::collection::vec(any::<u8>(), 0..=2048)) {
    let bulk = blocks_of(&data);
    let mut swapped = Fletcher4Lanes::new();
    swapped.compute_byteswap(bulk);

    let mut native = Fletcher4Lanes::new();
    native.compute_native(&swap_words(bulk));
    prop_assert_eq!(swapped, native);
  }

  #[test]
  fn block_aligned_chunking_is_invisible(
    data in proptest::collection::vec(any::<u8>(), 0..=2048),
    splits in proptest::collection::vec(0usize..=2048, 0..8),
  ) {
    let bulk = blocks_of(&data);
    let mut whole = Fletcher4Lanes::new();
    whole.compute_native(bulk);

    let mut cuts: Vec<usize> = splits.iter().map(|s| (s % (bulk.len() + 1)) & !15).collect();
    cuts.push(0);
    cuts.push(bulk.len());
    cuts.sort_unstable();

    let mut chunked = Fletcher4Lanes::new();
    for w in cuts.windows(2) {
      chunked.compute_native(&bulk[w[0]..w[1]]);
    }
    prop_assert_eq!(chunked, whole);
  }

  #[test]
  fn hasher_streaming_any_split(data in proptest::collection::vec(any::<u8>(), 0..=4096), chunk in 1usize..=257) {
    let mut h = Fletcher4Byteswap::new();
    for part in data.chunks(chunk) {
      h.update(part);
    }
    prop_assert_eq!(h.finalize(), Fletcher4Byteswap::checksum(&data));
  }

  #[test]
  fn resume_from_word_aligned_prefix(data in proptest::collection::vec(any::<u8>(), 0..=2048), split in 0usize..=2048) {
    let split = split.min(data.len()) & !3;
    let (a, b) = data.split_at(split);
    let mut h = Fletcher4::with_initial(Fletcher4::checksum(a));
    h.update(b);
    prop_assert_eq!(h.finalize(), Fletcher4::checksum(&data));
  }

  #[test]
  fn combine_matches_concatenation(data in proptest::collection::vec(any::<u8>(), 0..=2048), split in 0usize..=2048) {
    let split = split.min(data.len()) & !3;
    let (a, b) = data.split_at(split);
    let combined = Fletcher4Byteswap::combine(Fletcher4Byteswap::checksum(a), Fletcher4Byteswap::checksum(b), b.len());
    prop_assert_eq!(combined, Fletcher4Byteswap::checksum(&data));
  }

  #[test]
  fn fini_is_linear(x in any::<[[u64; 2]; 4]>(), y in any::<[[u64; 2]; 4]>()) {
    let [xa, xb, xc, xd] = x;
    let [ya, yb, yc, yd] = y;
    let add = |p: [u64; 2], q: [u64; 2]| [p[0].wrapping_add(q[0]), p[1].wrapping_add(q[1])];
    let sum = Fletcher4Lanes::from_lanes(add(xa, ya), add(xb, yb), add(xc, yc), add(xd, yd)).fini();

    let fx = Fletcher4Lanes::from_lanes(xa, xb, xc, xd).fini();
    let fy = Fletcher4Lanes::from_lanes(ya, yb, yc, yd).fini();
    let expected = Fletcher4Cksum::new(
      fx.a.wrapping_add(fy.a),
      fx.b.wrapping_add(fy.b),
      fx.c.wrapping_add(fy.c),
      fx.d.wrapping_add(fy.d),
    );
    prop_assert_eq!(sum, expected);
  }
}
