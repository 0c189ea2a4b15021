//! Guarded output buffers for out-of-bounds write detection.
//!
//! A kernel whose tiling or indexing math is off by one writes past the
//! declared output bounds. To make that visible, every output buffer carries
//! a trailing sentinel region stamped with a fixed bit pattern before any
//! kernel call; after the run the pattern must be intact.
//!
//! The guard sits immediately after the payload in the same allocation, so
//! an overrunning write lands in it instead of silently corrupting unrelated
//! memory. Kernels receive the full slice (payload + guard) and are required
//! by contract to write only the payload.

/// Width of the sentinel region in bytes.
pub const GUARD_BYTES: usize = 4;

/// Sentinel slots appended after the payload (f32-sized).
const GUARD_ELEMS: usize = GUARD_BYTES / std::mem::size_of::<f32>();

/// Bit pattern stamped into each sentinel slot.
const GUARD_PATTERN: u32 = 0xDEAD_BEEF;

/// An f32 buffer with a trailing guard region.
#[derive(Debug, Clone)]
pub struct GuardedBuffer {
    data: Vec<f32>,
    payload_len: usize,
}

impl GuardedBuffer {
    /// Allocate a zeroed buffer of `payload_len` elements plus the guard.
    pub fn allocate(payload_len: usize) -> Self {
        Self {
            data: vec![0.0; payload_len + GUARD_ELEMS],
            payload_len,
        }
    }

    /// Stamp the sentinel region with the guard pattern.
    ///
    /// Called once per run, before any kernel invocation touches the buffer.
    pub fn write_guard(&mut self) {
        for slot in &mut self.data[self.payload_len..] {
            *slot = f32::from_bits(GUARD_PATTERN);
        }
    }

    /// True iff every sentinel bit is unchanged since [`write_guard`].
    ///
    /// Compared bit-for-bit: the pattern is a NaN encoding, so a float
    /// equality test would always fail.
    ///
    /// [`write_guard`]: GuardedBuffer::write_guard
    pub fn check_guard(&self) -> bool {
        self.data[self.payload_len..]
            .iter()
            .all(|slot| slot.to_bits() == GUARD_PATTERN)
    }

    /// Length of the logical payload in elements.
    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// The logical payload region.
    pub fn payload(&self) -> &[f32] {
        &self.data[..self.payload_len]
    }

    /// The logical payload region, mutable.
    pub fn payload_mut(&mut self) -> &mut [f32] {
        &mut self.data[..self.payload_len]
    }

    /// Payload plus guard, as handed to a kernel under test.
    pub fn as_full_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
