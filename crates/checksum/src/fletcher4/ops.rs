//! Fletcher-4 operations tables.
//!
//! Every lane kernel is described by a [`Fletcher4Ops`] record bundling the
//! five core operations. Records are `static` and compiled in only for the
//! targets that can run them; [`all`] lists them and [`selected`] returns the
//! one the hashers and [`Fletcher4Lanes`] use.

use super::{Fletcher4Cksum, Fletcher4Force, Fletcher4Lanes, config, portable};

/// Lane compute function over whole 16-byte blocks.
pub type Fletcher4Fn = fn(&mut Fletcher4Lanes, &[[u8; 16]]);

/// Bundle of the core Fletcher-4 operations for one kernel.
#[derive(Clone, Copy, Debug)]
pub struct Fletcher4Ops {
  /// Kernel name, `"<arch>/<variant>"`.
  pub name: &'static str,
  /// Capability probe: whether this kernel runs vector code on this host.
  pub valid: fn() -> bool,
  /// Zero the accumulator.
  pub init: fn(&mut Fletcher4Lanes),
  /// Fold blocks in host byte order.
  pub compute_native: Fletcher4Fn,
  /// Fold blocks with every word byte-reversed.
  pub compute_byteswap: Fletcher4Fn,
  /// Recombine the lanes.
  pub fini: fn(&Fletcher4Lanes) -> Fletcher4Cksum,
}

fn always() -> bool {
  true
}

/// Two-lane kernel in general-purpose registers. Valid everywhere.
pub static PORTABLE_OPS: Fletcher4Ops = Fletcher4Ops {
  name: "portable/2-lane",
  valid: always,
  init: Fletcher4Lanes::init,
  compute_native: portable::compute_native,
  compute_byteswap: portable::compute_byteswap,
  fini: Fletcher4Lanes::fini,
};

/// SSE2 + SSSE3 kernel.
#[cfg(target_arch = "x86_64")]
pub static X86_64_SSSE3_OPS: Fletcher4Ops = Fletcher4Ops {
  name: "x86_64/sse2+ssse3",
  valid: super::is_supported,
  init: Fletcher4Lanes::init,
  compute_native: super::x86_64::compute_native,
  compute_byteswap: super::x86_64::compute_byteswap,
  fini: Fletcher4Lanes::fini,
};

/// NEON kernel (little-endian aarch64).
#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
pub static AARCH64_NEON_OPS: Fletcher4Ops = Fletcher4Ops {
  name: "aarch64/neon",
  valid: super::is_supported,
  init: Fletcher4Lanes::init,
  compute_native: super::aarch64::compute_native,
  compute_byteswap: super::aarch64::compute_byteswap,
  fini: Fletcher4Lanes::fini,
};

#[cfg(target_arch = "x86_64")]
static ALL: [&Fletcher4Ops; 2] = [&PORTABLE_OPS, &X86_64_SSSE3_OPS];

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
static ALL: [&Fletcher4Ops; 2] = [&PORTABLE_OPS, &AARCH64_NEON_OPS];

#[cfg(not(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little"))))]
static ALL: [&Fletcher4Ops; 1] = [&PORTABLE_OPS];

/// Every kernel compiled for this target, portable first.
///
/// Vector kernels are listed even when [`Fletcher4Ops::valid`] is false for
/// this host; calling them is still safe and falls back to portable code.
#[inline]
#[must_use]
pub fn all() -> &'static [&'static Fletcher4Ops] {
  &ALL
}

/// Best kernel this host can run.
#[inline]
#[must_use]
pub fn fastest() -> &'static Fletcher4Ops {
  all().iter().rev().copied().find(|ops| (ops.valid)()).unwrap_or(&PORTABLE_OPS)
}

fn select(force: Fletcher4Force) -> &'static Fletcher4Ops {
  match force {
    Fletcher4Force::Portable => &PORTABLE_OPS,
    Fletcher4Force::Auto | Fletcher4Force::Reference | Fletcher4Force::Simd => fastest(),
  }
}

/// Kernel selected by the current configuration.
///
/// [`Fletcher4Force::Portable`] pins the portable kernel; every other mode
/// picks [`fastest`]. The choice is made once per process and reused; while
/// a capabilities override is installed it is re-evaluated on every call.
#[inline]
#[must_use]
pub fn selected() -> &'static Fletcher4Ops {
  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static SELECTED: OnceLock<&'static Fletcher4Ops> = OnceLock::new();
    if !platform::has_override() {
      return *SELECTED.get_or_init(|| select(config::get().effective_force));
    }
  }

  select(config::get().effective_force)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn portable_is_first_and_always_valid() {
    let first = all().first().copied().unwrap();
    assert_eq!(first.name, PORTABLE_OPS.name);
    assert!((first.valid)());
  }

  #[test]
  fn names_are_unique() {
    let ops = all();
    for (i, x) in ops.iter().enumerate() {
      for y in ops.iter().skip(i + 1) {
        assert_ne!(x.name, y.name);
      }
    }
  }

  #[test]
  fn fastest_is_valid() {
    assert!((fastest().valid)());
  }

  #[test]
  fn selection_is_stable_and_valid() {
    let first = selected();
    for _ in 0..4 {
      assert!(core::ptr::eq(selected(), first));
    }
    assert!((first.valid)());
    assert!(all().iter().any(|ops| core::ptr::eq(*ops, first)));
  }

  #[test]
  fn record_round_trip_matches_direct_calls() {
    let data = [0x5Au8; 64];
    let (blocks, _) = data.as_chunks::<16>();
    for ops in all() {
      let mut lanes = Fletcher4Lanes::from_lanes([9; 2], [9; 2], [9; 2], [9; 2]);
      (ops.init)(&mut lanes);
      (ops.compute_native)(&mut lanes, blocks);
      assert_eq!((ops.fini)(&lanes), super::super::reference::fletcher4_native(&data), "{}", ops.name);
    }
  }
}
