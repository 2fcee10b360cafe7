//! Property-based tests for the Fletcher-4 hashers.
//!
//! These tests verify invariants that must hold for all inputs, not just
//! specific test vectors.

use checksum::{
  BufferedFletcher4Byteswap, Checksum, ChecksumCombine, Fletcher4, Fletcher4Byteswap, Fletcher4Cksum,
  fletcher4::reference,
};
use proptest::prelude::*;

// Test Strategies

/// Generate arbitrary byte vectors up to 8KB.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..8192)
}

/// Generate multiple split points for chunked testing.
fn arb_splits(len: usize, count: usize) -> impl Strategy<Value = Vec<usize>> {
  prop::collection::vec(0..=len, count).prop_map(move |mut splits| {
    splits.sort();
    splits.push(len);
    splits.dedup();
    splits
  })
}

fn arb_data_with_splits() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
  arb_data().prop_flat_map(|data| {
    let len = data.len();
    (Just(data), arb_splits(len, 6))
  })
}

// Generic Property Tests

fn prop_chunked_equals_oneshot<C: Checksum>(data: &[u8], splits: &[usize]) -> bool {
  let mut h = C::new();
  let mut start = 0;
  for &end in splits {
    h.update(&data[start..end]);
    start = end;
  }
  h.finalize() == C::checksum(data)
}

fn prop_resume<C: Checksum>(data: &[u8], split: usize) -> bool {
  let split = split.min(data.len()) & !3;
  let (a, b) = data.split_at(split);
  let mut h = C::with_initial(C::checksum(a));
  h.update(b);
  h.finalize() == C::checksum(data)
}

fn prop_combine<C: ChecksumCombine>(data: &[u8], split: usize) -> bool {
  let split = split.min(data.len()) & !3;
  let (a, b) = data.split_at(split);
  C::combine(C::checksum(a), C::checksum(b), b.len()) == C::checksum(data)
}

fn prop_finalize_idempotent<C: Checksum>(data: &[u8]) -> bool {
  let mut h = C::new();
  h.update(data);
  h.finalize() == h.finalize()
}

proptest! {
  #[test]
  fn native_chunked((data, splits) in arb_data_with_splits()) {
    prop_assert!(prop_chunked_equals_oneshot::<Fletcher4>(&data, &splits));
  }

  #[test]
  fn byteswap_chunked((data, splits) in arb_data_with_splits()) {
    prop_assert!(prop_chunked_equals_oneshot::<Fletcher4Byteswap>(&data, &splits));
  }

  #[test]
  fn native_resume(data in arb_data(), split in any::<usize>()) {
    prop_assert!(prop_resume::<Fletcher4>(&data, split));
  }

  #[test]
  fn byteswap_combine(data in arb_data(), split in any::<usize>()) {
    prop_assert!(prop_combine::<Fletcher4Byteswap>(&data, split));
  }

  #[test]
  fn native_combine(data in arb_data(), split in any::<usize>()) {
    prop_assert!(prop_combine::<Fletcher4>(&data, split));
  }

  #[test]
  fn finalize_idempotent(data in arb_data()) {
    prop_assert!(prop_finalize_idempotent::<Fletcher4>(&data));
  }

  #[test]
  fn matches_scalar_reference_on_whole_words(data in arb_data()) {
    let words = &data[..data.len() & !3];
    prop_assert_eq!(Fletcher4::checksum(words), reference::fletcher4_native(words));
    prop_assert_eq!(Fletcher4Byteswap::checksum(words), reference::fletcher4_byteswap(words));
  }

  #[test]
  fn buffered_matches_direct(data in arb_data(), chunk in 1usize..=300) {
    let mut h = BufferedFletcher4Byteswap::new();
    for part in data.chunks(chunk) {
      h.update(part);
    }
    prop_assert_eq!(h.finalize(), Fletcher4Byteswap::checksum(&data));
  }

  #[test]
  fn serialization_round_trip(words in any::<[u64; 4]>()) {
    let ck = Fletcher4Cksum::from_words(words);
    prop_assert_eq!(Fletcher4Cksum::from_le_bytes(ck.to_le_bytes()), ck);
    prop_assert_eq!(Fletcher4Cksum::from_be_bytes(ck.to_be_bytes()), ck);
  }
}
