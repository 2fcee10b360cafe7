//! Kernel dispatch introspection.
//!
//! Inspect which kernel the hashers pick on the current platform without
//! touching the hot path.
//!
//! # Examples
//!
//! ```
//! use checksum::{DispatchInfo, Fletcher4, KernelIntrospect};
//!
//! // Platform-level info
//! let info = DispatchInfo::current();
//! println!("{info}");
//!
//! // Per-algorithm kernel selection
//! println!("Fletcher-4 backend: {}", <Fletcher4 as KernelIntrospect>::backend_name());
//! println!("Fletcher-4 @ 4KB: {}", <Fletcher4 as KernelIntrospect>::kernel_name_for_len(4096));
//! ```

use core::fmt;

/// Information about the current dispatch configuration.
///
/// # Examples
///
/// ```
/// use checksum::DispatchInfo;
///
/// let info = DispatchInfo::current();
/// println!("{info}");
/// // Example output: "Caps(x86_64, [SSE2, SSSE3]) simd=true kernel=x86_64/sse2+ssse3"
/// ```
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  platform: platform::Description,
  simd_supported: bool,
  backend: &'static str,
}

impl DispatchInfo {
  /// Returns dispatch info for the current platform.
  ///
  /// Capability detection is cached after the first call in a process.
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    Self {
      platform: platform::describe(),
      simd_supported: crate::fletcher4::is_supported(),
      backend: crate::fletcher4::selected_backend(),
    }
  }

  /// Returns the platform description (architecture, features, override).
  #[inline]
  #[must_use]
  pub fn platform(&self) -> platform::Description {
    self.platform
  }

  /// Result of the Fletcher-4 capability probe.
  #[inline]
  #[must_use]
  pub fn simd_supported(&self) -> bool {
    self.simd_supported
  }

  /// Kernel used for large inputs.
  #[inline]
  #[must_use]
  pub fn backend(&self) -> &'static str {
    self.backend
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} simd={} kernel={}", self.platform, self.simd_supported, self.backend)
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("platform", &format_args!("{}", self.platform))
      .field("simd_supported", &self.simd_supported)
      .field("backend", &self.backend)
      .finish()
  }
}

/// Returns the kernel name selected for a specific algorithm and buffer size.
///
/// # Examples
///
/// ```
/// use checksum::{Fletcher4, kernel_for};
///
/// let small = kernel_for::<Fletcher4>(8);
/// let large = kernel_for::<Fletcher4>(65536);
/// assert_eq!(small, "reference/scalar");
/// println!("Large buffers: {large}");
/// ```
#[inline]
#[must_use]
pub fn kernel_for<T: KernelIntrospect>(len: usize) -> &'static str {
  T::kernel_name_for_len(len)
}

/// Trait for types that support kernel introspection.
pub trait KernelIntrospect {
  /// Returns the kernel name that would be selected for a buffer of `len` bytes.
  ///
  /// e.g. `"reference/scalar"` below the lane threshold, `"x86_64/sse2+ssse3"`
  /// above it on x86_64, `"portable/2-lane"` without vector support.
  fn kernel_name_for_len(len: usize) -> &'static str;

  /// Returns the currently selected backend name.
  fn backend_name() -> &'static str;
}
