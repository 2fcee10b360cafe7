//! Core checksum traits.
//!
//! This crate provides the foundational traits that checksum implementations
//! conform to. It is `no_std` compatible and has zero dependencies.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | Streaming, non-cryptographic checksums |
//! | [`ChecksumCombine`] | Merging the checksums of adjacent buffers |
//!
//! # Error Types
//!
//! - [`ChecksumMismatch`] - a stored checksum does not match the data
//! - [`UnalignedLength`] - a block kernel was handed a partial block
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod error;
#[cfg(feature = "std")]
pub mod io;

pub use checksum::{Checksum, ChecksumCombine};
pub use error::{ChecksumMismatch, UnalignedLength};
