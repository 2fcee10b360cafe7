//! Optional diagnostics for kernel selection.
//!
//! This module is behind `cfg(feature = "diag")` and explains why a given
//! kernel was picked without affecting normal builds.

use crate::Fletcher4Force;

/// High-level reason for a selection outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionReason {
  /// Shorter than one 16-byte block (always scalar).
  BelowSmallThreshold,
  /// A forced mode was active (kernel selection bypassed the threshold).
  Forced,
  /// Below the scalar→lanes transition threshold.
  BelowSimdThreshold,
  /// Normal auto selection.
  Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fletcher4SelectionDiag {
  pub len: usize,
  pub reason: SelectionReason,
  pub requested_force: Fletcher4Force,
  pub effective_force: Fletcher4Force,
  pub selected_kernel: &'static str,
  pub simd_threshold: usize,
  pub simd_supported: bool,
}

/// Diagnose Fletcher-4 selection for a single `update` of `len` bytes.
#[inline]
#[must_use]
pub fn fletcher4(len: usize) -> Fletcher4SelectionDiag {
  crate::fletcher4::diag_fletcher4(len)
}
