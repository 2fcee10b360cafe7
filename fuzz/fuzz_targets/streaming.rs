//! Fuzz target for the streaming Fletcher-4 API.
//!
//! Tests that arbitrary sequences of update calls produce the one-shot result.

#![no_main]

use arbitrary::Arbitrary;
use checksum::{BufferedFletcher4, Checksum, Fletcher4, Fletcher4Byteswap};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<u16>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  test_streaming::<Fletcher4>(data, &input.chunk_sizes);
  test_streaming::<Fletcher4Byteswap>(data, &input.chunk_sizes);
  test_buffered(data, &input.chunk_sizes);
});

fn chunks<'a>(data: &'a [u8], sizes: &'a [u16]) -> impl Iterator<Item = &'a [u8]> {
  let mut offset = 0;
  let mut idx = 0;
  core::iter::from_fn(move || {
    if offset >= data.len() {
      return None;
    }
    let size = sizes.get(idx % sizes.len().max(1)).map_or(1, |&s| usize::from(s).max(1));
    let end = (offset + size).min(data.len());
    let part = &data[offset..end];
    offset = end;
    idx += 1;
    Some(part)
  })
}

fn test_streaming<C: Checksum>(data: &[u8], sizes: &[u16]) {
  let expected = C::checksum(data);
  let mut hasher = C::new();
  for part in chunks(data, sizes) {
    hasher.update(part);
  }
  assert_eq!(hasher.finalize(), expected, "streaming mismatch, len={}", data.len());
}

fn test_buffered(data: &[u8], sizes: &[u16]) {
  let mut hasher = BufferedFletcher4::new();
  for part in chunks(data, sizes) {
    hasher.update(part);
  }
  assert_eq!(hasher.finalize(), Fletcher4::checksum(data), "buffered mismatch");
}
