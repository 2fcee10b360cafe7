//! Differential fuzzing across every Fletcher-4 kernel.
//!
//! Runs the scalar reference and each lane kernel compiled for this target
//! over the same blocks and requires identical results.

#![no_main]

use checksum::{
  Checksum, Fletcher4, Fletcher4Byteswap,
  fletcher4::{WordOrder, kernel_test::run_all_kernels, reference},
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  for order in [WordOrder::Native, WordOrder::Byteswap] {
    let results = run_all_kernels(data, order);
    let Some(oracle) = results.first() else {
      return;
    };
    for r in &results {
      assert_eq!(
        r.checksum, oracle.checksum,
        "kernel {} diverges from {} ({:?}, len={})",
        r.name,
        oracle.name,
        order,
        data.len()
      );
    }
  }

  // The hashers must agree with the scalar fold over the zero-padded input.
  let mut padded = data.to_vec();
  padded.resize(data.len().div_ceil(4) * 4, 0);
  assert_eq!(Fletcher4::checksum(data), reference::fletcher4_native(&padded));
  assert_eq!(Fletcher4Byteswap::checksum(data), reference::fletcher4_byteswap(&padded));
});
