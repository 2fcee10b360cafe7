//! Kernel introspection: verify which optimizations are active.
//!
//! Run with: `cargo run --example introspect -p checksum`

use checksum::{DispatchInfo, Fletcher4, KernelIntrospect, fletcher4, kernel_for};

fn main() {
  println!("=== Fletcher-4 Kernel Introspection ===\n");

  platform_info();
  kernels();
  size_based_dispatch();
}

/// Display detected platform capabilities.
fn platform_info() {
  println!("--- Platform Detection ---\n");

  let info = DispatchInfo::current();
  println!("Platform: {info}");
  println!("Platform Debug: {:?}", info.platform());
  println!("SIMD probe: {}", fletcher4::is_supported());
  println!("Config: {:?}", Fletcher4::config());
  println!();
}

/// Every kernel compiled for this target and whether this CPU runs it.
fn kernels() {
  println!("--- Compiled Kernels ---\n");

  for ops in fletcher4::ops::all() {
    let mark = if (ops.valid)() { "yes" } else { "no (falls back)" };
    println!("  {:<20} {mark}", ops.name);
  }
  println!("  selected: {}", fletcher4::ops::selected().name);
  println!();
}

/// Short updates use the scalar fold; longer ones the lane kernel.
fn size_based_dispatch() {
  println!("--- Size-Based Kernel Selection ---\n");

  for size in [4, 16, 63, 64, 4096, 1_048_576] {
    println!("  {:>10} bytes: {}", size, kernel_for::<Fletcher4>(size));
  }
  println!();
  println!("Backend: {}", <Fletcher4 as KernelIntrospect>::backend_name());
}
