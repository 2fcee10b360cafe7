//! Runtime CPU detection.
//!
//! Detection combines compile-time features (`cfg!(target_feature = ...)`)
//! with runtime probes (`is_x86_feature_detected!`, `is_aarch64_feature_detected!`).
//! The result is cached for the life of the process, so every caller sees the
//! same answer on every call.
//!
//! An override can replace the detected set. Overrides are meant for tests and
//! bare-metal deployments; they only ever narrow or describe what kernels may
//! run, never what a checksum evaluates to.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
fn cached() -> Caps {
  static CACHE: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();
  *CACHE.get_or_init(detect)
}

#[cfg(not(feature = "std"))]
fn cached() -> Caps {
  use core::sync::atomic::AtomicU8;

  // 0 = uninitialized, 1 = initializing, 2 = initialized
  static STATE: AtomicU8 = AtomicU8::new(0);
  static BITS: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

  if STATE.load(Ordering::Acquire) == 2 {
    return load_words(&BITS);
  }

  match STATE.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
    Ok(_) => {
      let caps = detect();
      store_words(&BITS, caps);
      STATE.store(2, Ordering::Release);
      caps
    }
    Err(_) => {
      while STATE.load(Ordering::Acquire) != 2 {
        core::hint::spin_loop();
      }
      load_words(&BITS)
    }
  }
}

fn load_words(words: &[AtomicU64; 4]) -> Caps {
  let [w0, w1, w2, w3] = words;
  Caps([
    w0.load(Ordering::Acquire),
    w1.load(Ordering::Acquire),
    w2.load(Ordering::Acquire),
    w3.load(Ordering::Acquire),
  ])
}

fn store_words(words: &[AtomicU64; 4], caps: Caps) {
  for (slot, value) in words.iter().zip(caps.0) {
    slot.store(value, Ordering::Release);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Override
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

pub(crate) fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      store_words(&OVERRIDE_BITS, caps);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

pub(crate) fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

/// Detected (or overridden) capabilities.
#[inline]
pub(crate) fn caps() -> Caps {
  if has_override() {
    return load_words(&OVERRIDE_BITS);
  }
  cached()
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection
// ─────────────────────────────────────────────────────────────────────────────

fn detect() -> Caps {
  // Miri cannot interpret SIMD intrinsics; keep every kernel portable.
  if cfg!(miri) {
    return Caps::NONE;
  }
  caps_static() | runtime()
}

/// Features guaranteed by the compilation target.
pub(crate) const fn caps_static() -> Caps {
  use crate::caps::{aarch64, x86};

  let mut caps = Caps::NONE;
  if cfg!(target_feature = "sse2") {
    caps = caps.union(x86::SSE2);
  }
  if cfg!(target_feature = "ssse3") {
    caps = caps.union(x86::SSSE3);
  }
  if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
    caps = caps.union(aarch64::NEON);
  }
  caps
}

#[cfg(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86")))]
fn runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if std::arch::is_x86_feature_detected!("sse2") {
    caps |= x86::SSE2;
  }
  if std::arch::is_x86_feature_detected!("ssse3") {
    caps |= x86::SSSE3;
  }
  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn runtime() -> Caps {
  use crate::caps::aarch64;

  let mut caps = Caps::NONE;
  if std::arch::is_aarch64_feature_detected!("neon") {
    caps |= aarch64::NEON;
  }
  caps
}

#[cfg(not(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64"))))]
fn runtime() -> Caps {
  Caps::NONE
}
