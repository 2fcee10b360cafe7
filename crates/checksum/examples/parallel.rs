//! Parallel checksumming with `combine`.
//!
//! Splits a buffer into word-aligned pieces, checksums them on separate
//! threads and merges the results.
//!
//! Run with: `cargo run --example parallel -p checksum`

use std::thread;

use checksum::{Checksum, ChecksumCombine, Fletcher4, Fletcher4Cksum};

const PIECE: usize = 1 << 20;

fn main() {
  let data: Vec<u8> = (0..8 * PIECE).map(|i| (i * 7 + 3) as u8).collect();

  let parts: Vec<(Fletcher4Cksum, usize)> = thread::scope(|s| {
    let handles: Vec<_> = data
      .chunks(PIECE)
      .map(|piece| s.spawn(move || (Fletcher4::checksum(piece), piece.len())))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  let combined = parts
    .into_iter()
    .fold(Fletcher4Cksum::ZERO, |acc, (ck, len)| Fletcher4::combine(acc, ck, len));

  let sequential = Fletcher4::checksum(&data);
  assert_eq!(combined, sequential);
  println!("{} bytes in {} pieces: {combined}", data.len(), data.len() / PIECE);
}
