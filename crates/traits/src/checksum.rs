//! Non-cryptographic checksum traits.
//!
//! - **Streaming**: incremental updates for data that arrives in pieces
//! - **Composable**: combine the checksums of adjacent buffers
//! - **Verifiable**: compare against a stored value on the read path

use core::fmt::Debug;

use crate::error::ChecksumMismatch;

/// Non-cryptographic checksum algorithm.
///
/// # Usage
///
/// ```rust,ignore
/// use checksum::{Checksum, Fletcher4};
///
/// // One-shot
/// let cksum = Fletcher4::checksum(b"hello world!");
///
/// // Streaming
/// let mut hasher = Fletcher4::new();
/// hasher.update(b"hello ");
/// hasher.update(b"world!");
/// assert_eq!(hasher.finalize(), cksum);
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `finalize()` must be idempotent (calling multiple times returns same value)
/// - `reset()` must restore the hasher to its initial state
/// - splitting the input across `update()` calls must not change the result
pub trait Checksum: Clone + Default {
  /// Serialized output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The checksum output type.
  type Output: Copy + Eq + Debug + Default;

  /// Create a new hasher with the default initial value.
  #[must_use]
  fn new() -> Self;

  /// Create a hasher that resumes from a previously finalized value.
  #[must_use]
  fn with_initial(initial: Self::Output) -> Self;

  /// Update the hasher with additional data.
  fn update(&mut self, data: &[u8]);

  /// Update the hasher with multiple non-contiguous buffers.
  ///
  /// Identical to calling [`update`](Self::update) on each buffer in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Update the hasher with `std::io::IoSlice` buffers.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Finalize and return the checksum.
  ///
  /// Does not consume the hasher; later updates continue from the same state.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Reset the hasher to its initial state.
  fn reset(&mut self);

  /// Compute the checksum of data in one shot.
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// Compute the checksum of multiple buffers in one shot.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }

  /// Recompute the checksum of `data` and compare it with `expected`.
  ///
  /// # Errors
  ///
  /// Returns [`ChecksumMismatch`] carrying both values when they differ.
  #[inline]
  fn verify(data: &[u8], expected: &Self::Output) -> Result<(), ChecksumMismatch<Self::Output>> {
    let actual = Self::checksum(data);
    if actual == *expected {
      Ok(())
    } else {
      Err(ChecksumMismatch::new(*expected, actual))
    }
  }

  /// Wrap a reader to compute the checksum of everything read through it.
  ///
  /// ```rust,ignore
  /// use checksum::Fletcher4;
  /// use std::fs::File;
  ///
  /// let mut reader = Fletcher4::reader(File::open("block.bin")?);
  /// std::io::copy(&mut reader, &mut std::io::sink())?;
  /// println!("{}", reader.checksum());
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(inner: R) -> crate::io::ChecksumReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumReader::new(inner)
  }

  /// Wrap a writer to compute the checksum of everything written through it.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(inner: W) -> crate::io::ChecksumWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumWriter::new(inner)
  }
}

/// Checksums whose value over `A || B` is derivable from the values over `A`
/// and `B` plus the length of `B`.
///
/// This allows buffers to be checksummed independently (on different threads,
/// or as they arrive out of order) and merged afterwards.
///
/// # Usage
///
/// ```rust,ignore
/// use checksum::{Checksum, ChecksumCombine, Fletcher4};
///
/// let data = [7u8; 4096];
/// let (a, b) = data.split_at(1024);
///
/// let combined = Fletcher4::combine(Fletcher4::checksum(a), Fletcher4::checksum(b), b.len());
/// assert_eq!(combined, Fletcher4::checksum(&data));
/// ```
pub trait ChecksumCombine: Checksum {
  /// Given `a = checksum(A)` and `b = checksum(B)`, computes `checksum(A || B)`.
  ///
  /// Implementations document any alignment requirement on `A`.
  #[must_use]
  fn combine(a: Self::Output, b: Self::Output, len_b: usize) -> Self::Output;
}
