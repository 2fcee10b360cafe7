//! Error types shared by checksum implementations.

use core::fmt;

/// A recomputed checksum did not match the stored value.
///
/// Both values are kept so the caller can log or report them.
///
/// ```
/// use traits::ChecksumMismatch;
///
/// let err = ChecksumMismatch::new(1u32, 2u32);
/// assert_eq!(err.expected(), 1);
/// assert_eq!(err.actual(), 2);
/// assert_eq!(err.to_string(), "checksum mismatch: expected 1, actual 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChecksumMismatch<T> {
  expected: T,
  actual: T,
}

impl<T: Copy> ChecksumMismatch<T> {
  /// Create a mismatch error.
  #[inline]
  #[must_use]
  pub const fn new(expected: T, actual: T) -> Self {
    Self { expected, actual }
  }

  /// The value the caller expected (usually read from storage).
  #[inline]
  #[must_use]
  pub const fn expected(&self) -> T {
    self.expected
  }

  /// The value computed from the data.
  #[inline]
  #[must_use]
  pub const fn actual(&self) -> T {
    self.actual
  }
}

impl<T: fmt::Display> fmt::Display for ChecksumMismatch<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "checksum mismatch: expected {}, actual {}", self.expected, self.actual)
  }
}

impl<T: fmt::Debug + fmt::Display> core::error::Error for ChecksumMismatch<T> {}

/// A block-oriented kernel received a buffer that is not a whole number of
/// blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnalignedLength {
  len: usize,
  multiple: usize,
}

#[allow(clippy::len_without_is_empty)]
impl UnalignedLength {
  /// Create the error for a buffer of `len` bytes that must be a multiple of
  /// `multiple`.
  #[inline]
  #[must_use]
  pub const fn new(len: usize, multiple: usize) -> Self {
    Self { len, multiple }
  }

  /// Length of the rejected buffer.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Required block size.
  #[inline]
  #[must_use]
  pub const fn multiple(&self) -> usize {
    self.multiple
  }
}

impl fmt::Display for UnalignedLength {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "buffer length {} is not a multiple of {} bytes",
      self.len, self.multiple
    )
  }
}

impl core::error::Error for UnalignedLength {}
