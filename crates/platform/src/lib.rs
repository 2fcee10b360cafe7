//! CPU capability detection for checksum kernel selection.
//!
//! This crate is the single source of truth for "which vector instructions
//! may run here". Kernels query [`caps()`] instead of doing ad-hoc detection.
//!
//! # Design
//!
//! 1. **One API**: algorithms ask `platform::caps()`.
//! 2. **Zero-cost when possible**: compile-time features come from `cfg!`.
//! 3. **Cached otherwise**: runtime detection runs once per process
//!    (`OnceLock` with `std`, atomics without).
//! 4. **Miri-safe**: under Miri the set is empty and every caller falls back
//!    to portable code.
//!
//! ```
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! let _simd = caps.has(x86::SIMD128_READY);
//! println!("{}", platform::describe());
//! ```

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

use core::fmt;

pub use caps::{Arch, Caps};

/// Detected CPU capabilities.
///
/// Returns the same value on every call within a process unless an override
/// is installed with [`set_caps_override`].
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Capabilities guaranteed at compile time (`-C target-feature`).
#[inline]
#[must_use]
pub const fn caps_static() -> Caps {
  detect::caps_static()
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override instead of the detected set.
/// Pass `None` to resume detection.
///
/// Installing capabilities the CPU does not have makes callers execute
/// unsupported instructions. Use this to *remove* features (forcing portable
/// paths in tests) or on bare metal where the CPU is known.
///
/// ```
/// platform::set_caps_override(Some(platform::Caps::NONE));
/// assert!(platform::caps().is_empty());
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// Human-readable summary of the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Description {
  pub arch: Arch,
  pub caps: Caps,
  pub overridden: bool,
}

/// Describe the current platform (architecture + capabilities).
#[inline]
#[must_use]
pub fn describe() -> Description {
  Description {
    arch: Arch::current(),
    caps: caps(),
    overridden: has_override(),
  }
}

impl fmt::Display for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Caps({}, [", self.arch)?;
    for (i, name) in self.caps.feature_names().enumerate() {
      if i != 0 {
        f.write_str(", ")?;
      }
      f.write_str(name)?;
    }
    f.write_str("])")?;
    if self.overridden {
      f.write_str(" (override)")?;
    }
    Ok(())
  }
}
