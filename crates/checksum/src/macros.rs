//! Internal macros for Fletcher-4 variant generation.
//!
//! The native and byteswap hashers share identical structure and differ only
//! in how stored bytes map to words.

/// Generate a Fletcher-4 hasher type with all trait implementations.
///
/// This macro creates:
/// - The struct definition (running sums, resume point, pending partial word)
/// - `backend_name()`, `config()`, `kernel_name_for_len()` methods
/// - `Checksum`, `ChecksumCombine` and `KernelIntrospect` implementations
///
/// # Arguments
///
/// - `$name`: The type name (e.g., `Fletcher4Byteswap`)
/// - `$order`: The `WordOrder` the hasher reads words in
macro_rules! define_fletcher4_type {
  (
    $(#[$outer:meta])*
    $vis:vis struct $name:ident {
      order: $order:expr,
    }
  ) => {
    $(#[$outer])*
    #[derive(Clone, Debug, Default)]
    $vis struct $name {
      state: $crate::Fletcher4Cksum,
      initial: $crate::Fletcher4Cksum,
      /// Bytes of an incomplete word; zero past `pending_len`.
      pending: [u8; 4],
      pending_len: u8,
    }

    impl $name {
      /// Word order this hasher reads.
      pub const ORDER: $crate::fletcher4::WordOrder = $order;

      /// Get the name of the currently selected backend.
      #[must_use]
      pub fn backend_name() -> &'static str {
        $crate::fletcher4::selected_backend()
      }

      /// Get the effective Fletcher-4 configuration (overrides + threshold).
      #[must_use]
      pub fn config() -> $crate::Fletcher4Config {
        $crate::fletcher4::config::get()
      }

      /// Returns the kernel name that a single `update` of `len` bytes uses.
      ///
      /// This is intended for debugging/benchmarking and does not allocate.
      #[must_use]
      pub fn kernel_name_for_len(len: usize) -> &'static str {
        $crate::fletcher4::kernel_name_for_len(len)
      }
    }

    impl $crate::Checksum for $name {
      const OUTPUT_SIZE: usize = $crate::Fletcher4Cksum::SIZE;
      type Output = $crate::Fletcher4Cksum;

      #[inline]
      fn new() -> Self {
        Self::default()
      }

      #[inline]
      fn with_initial(initial: $crate::Fletcher4Cksum) -> Self {
        Self {
          state: initial,
          initial,
          pending: [0; 4],
          pending_len: 0,
        }
      }

      fn update(&mut self, data: &[u8]) {
        let mut input = data;

        // Complete a word left over from the previous call.
        if self.pending_len != 0 {
          let have = usize::from(self.pending_len);
          let take = (4 - have).min(input.len());
          let (head, rest) = input.split_at(take);
          if let Some(dst) = self.pending.get_mut(have..have + take) {
            dst.copy_from_slice(head);
          }
          self.pending_len += take as u8;
          input = rest;

          if self.pending_len < 4 {
            return;
          }
          self.state = $crate::fletcher4::fold_pending(self.state, self.pending, Self::ORDER);
          self.pending = [0; 4];
          self.pending_len = 0;
        }

        let (words, tail) = input.split_at(input.len() & !3);
        self.state = $crate::fletcher4::absorb(self.state, words, Self::ORDER);

        if let Some(dst) = self.pending.get_mut(..tail.len()) {
          dst.copy_from_slice(tail);
          self.pending_len = tail.len() as u8;
        }
      }

      #[inline]
      fn finalize(&self) -> $crate::Fletcher4Cksum {
        if self.pending_len == 0 {
          self.state
        } else {
          $crate::fletcher4::fold_pending(self.state, self.pending, Self::ORDER)
        }
      }

      #[inline]
      fn reset(&mut self) {
        *self = <Self as $crate::Checksum>::with_initial(self.initial);
      }
    }

    impl $crate::ChecksumCombine for $name {
      /// Checksum of `A || B`.
      ///
      /// `A` must be a whole number of 32-bit words. A trailing partial word
      /// in `B` counts as one zero-padded word.
      fn combine(a: $crate::Fletcher4Cksum, b: $crate::Fletcher4Cksum, len_b: usize) -> $crate::Fletcher4Cksum {
        $crate::fletcher4::reference::combine(a, b, len_b)
      }
    }

    impl $crate::KernelIntrospect for $name {
      fn kernel_name_for_len(len: usize) -> &'static str {
        $crate::fletcher4::kernel_name_for_len(len)
      }

      fn backend_name() -> &'static str {
        $crate::fletcher4::selected_backend()
      }
    }
  };
}

/// Generate a buffered wrapper for a Fletcher-4 hasher.
///
/// Small updates are collected in a heap buffer so they reach the lane kernels
/// in blocks at or above the configured threshold.
///
/// # Arguments
///
/// - `$name`: The wrapper type name (e.g., `BufferedFletcher4`)
/// - `$inner`: The inner hasher type (e.g., `Fletcher4`)
/// - `$buffer_size`: The buffer size in bytes (a multiple of 16)
#[cfg(feature = "alloc")]
macro_rules! define_buffered_fletcher4 {
  (
    $(#[$outer:meta])*
    $vis:vis struct $name:ident<$inner:ty> {
      buffer_size: $buffer_size:expr,
    }
  ) => {
    $(#[$outer])*
    #[derive(Clone, Debug)]
    $vis struct $name {
      inner: $inner,
      buffer: alloc::boxed::Box<[u8; $buffer_size]>,
      len: usize,
    }

    impl $name {
      /// Create a new buffered hasher.
      #[must_use]
      pub fn new() -> Self {
        Self {
          inner: <$inner as $crate::Checksum>::new(),
          buffer: alloc::boxed::Box::new([0u8; $buffer_size]),
          len: 0,
        }
      }

      /// Update the checksum with more data.
      ///
      /// Data is buffered internally until enough accumulates for the lane
      /// kernels.
      pub fn update(&mut self, data: &[u8]) {
        let threshold = <$inner>::config().simd_threshold.clamp(16, $buffer_size);
        let mut input = data;

        // If we have buffered data, try to fill and flush
        if self.len > 0 {
          let fill = input.len().min($buffer_size - self.len);
          let (head, rest) = input.split_at(fill);
          if let Some(dst) = self.buffer.get_mut(self.len..self.len + fill) {
            dst.copy_from_slice(head);
          }
          self.len += fill;
          input = rest;

          if self.len >= $buffer_size || (self.len >= threshold && input.is_empty()) {
            self.flush();
          }
        }

        // Large inputs skip the buffer; keep the prefix word-aligned.
        if input.len() >= threshold {
          self.flush();
          let (bulk, rest) = input.split_at(input.len() & !15);
          <$inner as $crate::Checksum>::update(&mut self.inner, bulk);
          input = rest;
        }

        if !input.is_empty() {
          if let Some(dst) = self.buffer.get_mut(self.len..self.len + input.len()) {
            dst.copy_from_slice(input);
            self.len += input.len();
          }
        }
      }

      fn flush(&mut self) {
        if let Some(buffered) = self.buffer.get(..self.len) {
          <$inner as $crate::Checksum>::update(&mut self.inner, buffered);
        }
        self.len = 0;
      }

      /// Finalize and return the checksum.
      ///
      /// Folds any buffered data into a copy of the state.
      #[must_use]
      pub fn finalize(&self) -> $crate::Fletcher4Cksum {
        let mut inner = self.inner.clone();
        if let Some(buffered) = self.buffer.get(..self.len) {
          <$inner as $crate::Checksum>::update(&mut inner, buffered);
        }
        <$inner as $crate::Checksum>::finalize(&inner)
      }

      /// Reset the hasher to initial state.
      pub fn reset(&mut self) {
        <$inner as $crate::Checksum>::reset(&mut self.inner);
        self.len = 0;
      }

      /// Get the name of the currently selected backend.
      #[must_use]
      pub fn backend_name() -> &'static str {
        <$inner>::backend_name()
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }
  };
}
