use std::io::{Read, Write};

use checksum::{
  Checksum, ChecksumCombine, Fletcher4, Fletcher4Be, Fletcher4Byteswap, Fletcher4Cksum, Fletcher4Lanes, Fletcher4Le,
  UnalignedLength, fletcher4::reference,
};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

/// Scalar recurrence over little-endian words, reduced mod 2^64 through `u128`.
fn modular_le(data: &[u8]) -> [u64; 4] {
  const MASK: u128 = u64::MAX as u128;
  let (mut a, mut b, mut c, mut d) = (0u128, 0u128, 0u128, 0u128);
  for w in data.chunks_exact(4) {
    let w = u32::from_le_bytes([w[0], w[1], w[2], w[3]]);
    a = (a + u128::from(w)) & MASK;
    b = (b + a) & MASK;
    c = (c + b) & MASK;
    d = (d + c) & MASK;
  }
  [a as u64, b as u64, c as u64, d as u64]
}

// ─────────────────────────────────────────────────────────────────────────────
// Vectors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_counting_bytes() {
  let data: Vec<u8> = (0u8..64).collect();
  let expected = Fletcher4Cksum::new(
    0x0000_0002_1201_f1e0,
    0x0000_000c_43bb_32a0,
    0x0000_0039_9663_2fd0,
    0x0000_00e3_f0bd_89b0,
  );
  assert_eq!(Fletcher4Le::checksum(&data), expected);

  let mut lanes = Fletcher4Lanes::new();
  if cfg!(target_endian = "little") {
    lanes.compute_native(&data);
  } else {
    lanes.compute_byteswap(&data);
  }
  assert_eq!(lanes.fini(), expected);

  assert_eq!(
    Fletcher4Be::checksum(&data).to_string(),
    "1e1f20210:aab33bc38:3003366960:b675a8db1c"
  );
}

#[test]
fn empty_input_is_zero() {
  assert_eq!(Fletcher4::checksum(&[]), Fletcher4Cksum::ZERO);
  assert_eq!(Fletcher4Byteswap::checksum(&[]), Fletcher4Cksum::ZERO);
  assert_eq!(Fletcher4Lanes::new().fini(), Fletcher4Cksum::ZERO);
}

#[test]
fn high_bit_words_zero_extend() {
  let data = [0xFFu8; 16];
  let ck = Fletcher4Le::checksum(&data);
  assert_eq!(ck.a, 4 * u64::from(u32::MAX));
  assert_eq!(ck.words(), modular_le(&data));
}

#[test]
fn all_ones_megabyte_wraps_like_modular_reference() {
  // D passes 2^64 well before 1 MiB of 0xFF words.
  let data = vec![0xFFu8; 1 << 20];
  let expected = modular_le(&data);
  assert_eq!(Fletcher4Le::checksum(&data).words(), expected);
  assert_eq!(Fletcher4Be::checksum(&data).words(), expected);
}

#[test]
fn random_buffers_match_modular_reference() {
  for (i, len) in [16usize, 64, 100, 1024, 4096, 65_536 + 20].into_iter().enumerate() {
    let data = gen_bytes(len, 0x9E37_79B9_7F4A_7C15 ^ i as u64);
    assert_eq!(Fletcher4Le::checksum(&data).words(), modular_le(&data), "len {len}");
  }
}

#[test]
fn seeded_hasher_wraps() {
  let seed = Fletcher4Cksum::new(u64::MAX - 10, u64::MAX - 20, u64::MAX - 30, u64::MAX - 40);
  let data = gen_bytes(4096, 7);
  let mut h = Fletcher4::with_initial(seed);
  h.update(&data);
  assert_eq!(h.finalize(), reference::fold_native(seed, &data));
}

// ─────────────────────────────────────────────────────────────────────────────
// Equivalences
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn byteswap_equals_native_over_swapped_copy() {
  let data = gen_bytes(4096, 42);
  let swapped: Vec<u8> = data.chunks_exact(4).flat_map(|w| [w[3], w[2], w[1], w[0]]).collect();
  assert_eq!(Fletcher4Byteswap::checksum(&data), Fletcher4::checksum(&swapped));

  let mut a = Fletcher4Lanes::new();
  a.compute_byteswap(&data);
  let mut b = Fletcher4Lanes::new();
  b.compute_native(&swapped);
  assert_eq!(a, b);
}

#[test]
fn lanes_chunking_is_deterministic() {
  let data = gen_bytes(16 * 200, 3);
  let mut whole = Fletcher4Lanes::new();
  whole.compute_native(&data);

  for step in [16, 32, 48, 160, 1600] {
    let mut chunked = Fletcher4Lanes::new();
    for part in data.chunks(step) {
      chunked.compute_native(part);
    }
    assert_eq!(chunked, whole, "step {step}");
    assert_eq!(chunked.fini(), reference::fletcher4_native(&data));
  }
}

#[test]
fn hasher_every_split_point() {
  let data = gen_bytes(300, 11);
  let oneshot = Fletcher4::checksum(&data);
  for split in 0..=data.len() {
    let (a, b) = data.split_at(split);
    let mut h = Fletcher4::new();
    h.update(a);
    h.update(b);
    assert_eq!(h.finalize(), oneshot, "split {split}");
  }
}

#[test]
fn vectored_update_matches_contiguous() {
  let data = gen_bytes(777, 5);
  let (a, rest) = data.split_at(13);
  let (b, c) = rest.split_at(500);
  assert_eq!(Fletcher4::checksum_vectored(&[a, b, c]), Fletcher4::checksum(&data));
}

#[test]
fn combine_with_large_suffix() {
  let prefix = gen_bytes(64, 1);
  let suffix = gen_bytes((8 << 20) + 36, 2);
  let mut whole = prefix.clone();
  whole.extend_from_slice(&suffix);

  let combined = Fletcher4::combine(Fletcher4::checksum(&prefix), Fletcher4::checksum(&suffix), suffix.len());
  assert_eq!(combined, Fletcher4::checksum(&whole));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors and I/O
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn checked_lane_entry_points() {
  let mut lanes = Fletcher4Lanes::new();
  assert_eq!(lanes.try_compute_native(&[0; 17]), Err(UnalignedLength::new(17, 16)));
  assert_eq!(lanes.try_compute_byteswap(&[0; 8]), Err(UnalignedLength::new(8, 16)));
  assert_eq!(lanes, Fletcher4Lanes::new());
  assert_eq!(lanes.try_compute_native(&[1; 32]), Ok(()));
}

#[test]
fn verify_detects_corruption() {
  let mut data = gen_bytes(4096, 99);
  let stored = Fletcher4Le::checksum(&data);
  assert!(Fletcher4Le::verify(&data, &stored).is_ok());

  data[1234] ^= 0x01;
  let err = Fletcher4Le::verify(&data, &stored).unwrap_err();
  assert_eq!(err.expected(), stored);
  assert_ne!(err.actual(), stored);
  assert!(err.to_string().starts_with("checksum mismatch: expected "));
}

#[test]
fn reader_and_writer_adapters() {
  let data = gen_bytes(10_000, 8);

  let mut reader = Fletcher4::reader(std::io::Cursor::new(data.clone()));
  let mut sink = Vec::new();
  reader.read_to_end(&mut sink).unwrap();
  assert_eq!(reader.checksum(), Fletcher4::checksum(&data));

  let mut writer = Fletcher4::writer(Vec::new());
  for part in data.chunks(333) {
    writer.write_all(part).unwrap();
  }
  let (out, ck) = writer.into_parts();
  assert_eq!(out, data);
  assert_eq!(ck, Fletcher4::checksum(&data));
}

#[test]
fn buffered_matches_unbuffered() {
  let data = gen_bytes(20_000, 21);
  let mut buffered = checksum::BufferedFletcher4::new();
  for part in data.chunks(7) {
    buffered.update(part);
  }
  assert_eq!(buffered.finalize(), Fletcher4::checksum(&data));

  buffered.reset();
  buffered.update(&data);
  assert_eq!(buffered.finalize(), Fletcher4::checksum(&data));
}
