//! Fletcher-4 checksum with two-lane SIMD acceleration.
//!
//! Fletcher-4 is the four-sum, 32-bit-word checksum storage systems use to
//! detect silent corruption of data blocks. This crate computes it with two
//! interleaved accumulator lanes so that vector units can advance both lanes
//! per instruction, then recombines the lanes into the exact value of the
//! scalar recurrence.
//!
//! # Types
//!
//! | Type | Words | Use |
//! |------|-------|-----|
//! | [`Fletcher4`] | host byte order | in-memory buffers |
//! | [`Fletcher4Byteswap`] | byte-reversed | data written by an opposite-endian host |
//! | [`Fletcher4Le`] / [`Fletcher4Be`] | fixed | on-disk formats |
//! | [`Fletcher4Lanes`] | host / byte-reversed | raw 16-byte-block kernel |
//!
//! # Hardware Acceleration
//!
//! | Target | Kernel | Requires |
//! |--------|--------|----------|
//! | x86_64 | `x86_64/sse2+ssse3` | SSE2, SSSE3 |
//! | aarch64 (LE) | `aarch64/neon` | NEON |
//! | other | `portable/2-lane` | - |
//!
//! # Example
//!
//! ```rust
//! use checksum::{Checksum, ChecksumCombine, Fletcher4Le};
//!
//! let data: Vec<u8> = (0u8..64).collect();
//!
//! // One-shot computation
//! let ck = Fletcher4Le::checksum(&data);
//! assert_eq!(ck.a, 0x2_1201_f1e0);
//!
//! // Streaming computation
//! let mut hasher = Fletcher4Le::new();
//! hasher.update(&data[..10]);
//! hasher.update(&data[10..]);
//! assert_eq!(hasher.finalize(), ck);
//!
//! // Combine (the first part must be a whole number of words)
//! let (a, b) = data.split_at(24);
//! let combined = Fletcher4Le::combine(Fletcher4Le::checksum(a), Fletcher4Le::checksum(b), b.len());
//! assert_eq!(combined, ck);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the `std` feature for embedded use:
//!
//! ```toml
//! [dependencies]
//! checksum = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// Internal macros must be declared before modules that use them.
#[macro_use]
mod macros;

#[cfg(feature = "diag")]
pub mod diag;
pub mod fletcher4;
mod introspect;

#[cfg(feature = "alloc")]
pub use fletcher4::{BufferedFletcher4, BufferedFletcher4Byteswap};
pub use fletcher4::{
  Fletcher4, Fletcher4Be, Fletcher4Byteswap, Fletcher4Cksum, Fletcher4Config, Fletcher4Force, Fletcher4Lanes,
  Fletcher4Le, Fletcher4Ops,
};
pub use introspect::{DispatchInfo, KernelIntrospect, kernel_for};
#[cfg(feature = "std")]
pub use traits::io::{ChecksumReader, ChecksumWriter};
// Re-export traits for convenience
pub use traits::{Checksum, ChecksumCombine, ChecksumMismatch, UnalignedLength};
