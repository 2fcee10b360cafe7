//! Basic Fletcher-4 usage: one-shot, streaming, verify.
//!
//! Run with: `cargo run --example basic -p checksum`

use checksum::{Checksum, Fletcher4Be, Fletcher4Le};

fn main() {
  let block: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();

  // One-shot
  let ck = Fletcher4Le::checksum(&block);
  println!("fletcher4 (le words): {ck}");
  println!("fletcher4 (be words): {}", Fletcher4Be::checksum(&block));

  // Streaming, arbitrary split points
  let mut hasher = Fletcher4Le::new();
  for part in block.chunks(1000) {
    hasher.update(part);
  }
  assert_eq!(hasher.finalize(), ck);

  // On-disk form and verification on read
  let stored = ck.to_le_bytes();
  let expected = checksum::Fletcher4Cksum::from_le_bytes(stored);
  match Fletcher4Le::verify(&block, &expected) {
    Ok(()) => println!("verified {} bytes", block.len()),
    Err(e) => println!("{e}"),
  }

  let mut corrupted = block.clone();
  corrupted[100] ^= 0x40;
  if let Err(e) = Fletcher4Le::verify(&corrupted, &expected) {
    println!("corruption detected: {e}");
  }
}
