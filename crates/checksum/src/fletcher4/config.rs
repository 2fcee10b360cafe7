//! Fletcher-4 runtime configuration (overrides + threshold).
//!
//! Centralizes the selection knobs for the hashers:
//! - the length at which the lane kernels replace the scalar fold
//! - an optional forced backend
//!
//! Forced modes are always clamped to detected CPU capabilities.

use platform::Caps;

/// Default minimum `update` length (bytes) routed through the lane kernels.
pub const DEFAULT_SIMD_THRESHOLD: usize = 64;

/// Forced backend selection for Fletcher-4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Fletcher4Force {
  /// Scalar fold for short inputs, fastest lane kernel above the threshold.
  #[default]
  Auto,
  /// Scalar fold for every input.
  Reference,
  /// Portable 2-lane kernel for every input with at least one block.
  Portable,
  /// Vector kernel for every input with at least one block (if available).
  ///
  /// - x86_64: SSE2 + SSSE3
  /// - aarch64: NEON
  Simd,
}

impl Fletcher4Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Reference => "reference",
      Self::Portable => "portable",
      Self::Simd => "simd",
    }
  }
}

/// Full Fletcher-4 runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fletcher4Config {
  /// Requested force mode (env).
  pub requested_force: Fletcher4Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Fletcher4Force,
  /// Bytes where the lane kernels take over from the scalar fold.
  pub simd_threshold: usize,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Fletcher4Force,
  simd_threshold: Option<usize>,
}

#[cfg(feature = "std")]
fn parse_force(value: &str) -> Option<Fletcher4Force> {
  let value = value.trim();
  if value.eq_ignore_ascii_case("auto") {
    return Some(Fletcher4Force::Auto);
  }
  if value.eq_ignore_ascii_case("reference") || value.eq_ignore_ascii_case("scalar") {
    return Some(Fletcher4Force::Reference);
  }
  if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("lanes") {
    return Some(Fletcher4Force::Portable);
  }
  if value.eq_ignore_ascii_case("simd")
    || value.eq_ignore_ascii_case("sse")
    || value.eq_ignore_ascii_case("ssse3")
    || value.eq_ignore_ascii_case("neon")
  {
    return Some(Fletcher4Force::Simd);
  }
  None
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  Overrides {
    force: var("CHECKSUM_FLETCHER4_FORCE")
      .and_then(|v| parse_force(&v))
      .unwrap_or_default(),
    simd_threshold: var("CHECKSUM_FLETCHER4_THRESHOLD").and_then(|v| v.trim().parse::<usize>().ok()),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64/aarch64
fn clamp_force_to_caps(requested: Fletcher4Force, caps: Caps) -> Fletcher4Force {
  match requested {
    Fletcher4Force::Auto | Fletcher4Force::Reference | Fletcher4Force::Portable => requested,
    Fletcher4Force::Simd => {
      #[cfg(target_arch = "x86_64")]
      {
        if caps.has(platform::caps::x86::SIMD128_READY) {
          return Fletcher4Force::Simd;
        }
      }
      #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
      {
        if caps.has(platform::caps::aarch64::SIMD128_READY) {
          return Fletcher4Force::Simd;
        }
      }
      Fletcher4Force::Auto
    }
  }
}

#[inline]
#[must_use]
fn resolve(ov: Overrides, caps: Caps) -> Fletcher4Config {
  Fletcher4Config {
    requested_force: ov.force,
    effective_force: clamp_force_to_caps(ov.force, caps),
    simd_threshold: ov.simd_threshold.unwrap_or(DEFAULT_SIMD_THRESHOLD),
  }
}

/// Get the effective Fletcher-4 configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Fletcher4Config {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<Fletcher4Config> = OnceLock::new();
    if !platform::has_override() {
      return *CACHED.get_or_init(|| resolve(overrides(), platform::caps()));
    }
  }

  resolve(overrides(), platform::caps())
}
