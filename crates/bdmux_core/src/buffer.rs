//! Growable byte buffer for command and metadata text.
//!
//! The buffer always keeps at least one byte of spare capacity past its
//! length, so handing the contents to a consumer that wants a terminated
//! string never forces a reallocation. Whenever an append does not fit, the
//! capacity grows to `max(needed, capacity * 2)`, which bounds the number of
//! reallocations for appends of total length `L` to `O(log L)`.
//!
//! Formatted appends are two-phase: the rendered length is measured first,
//! the buffer grows once to fit, and the text is then written through a
//! writer that refuses to go past the measured length.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// Capacity reserved by the first allocation.
pub const INITIAL_CAPACITY: usize = 16;

/// Errors raised while appending to a [`GrowableBuffer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator could not provide the requested capacity.
    #[error("failed to allocate {requested} bytes for text buffer")]
    AllocationFailure { requested: usize },

    /// A `Display` implementation reported an error, or rendered differently
    /// between the measuring and the writing pass.
    #[error("formatting failed while appending to text buffer")]
    Format,
}

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Append-only byte buffer with doubling growth.
///
/// Single owner, never shared. The slice returned by [`contents`] borrows the
/// buffer and is therefore invalidated by the next append.
///
/// [`contents`]: GrowableBuffer::contents
#[derive(Debug, Default)]
pub struct GrowableBuffer {
    data: Vec<u8>,
    /// Capacity managed by the growth policy (independent of what the
    /// allocator happens to hand back).
    capacity: usize,
    /// Number of times the storage was (re)allocated.
    growths: usize,
}

impl GrowableBuffer {
    /// Create an empty buffer. Nothing is allocated until the first append.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> BufferResult<()> {
        self.ensure_space(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append UTF-8 text.
    pub fn append_text(&mut self, text: &str) -> BufferResult<()> {
        self.append_bytes(text.as_bytes())
    }

    /// Append formatted text, measuring it before writing.
    pub fn append_formatted(&mut self, args: fmt::Arguments<'_>) -> BufferResult<()> {
        let mut counter = LengthCounter(0);
        fmt::write(&mut counter, args).map_err(|_| BufferError::Format)?;
        let rendered = counter.0;

        self.ensure_space(rendered)?;

        let start = self.data.len();
        let mut writer = BoundedWriter {
            data: &mut self.data,
            remaining: rendered,
        };
        if fmt::write(&mut writer, args).is_err() || writer.remaining != 0 {
            self.data.truncate(start);
            return Err(BufferError::Format);
        }

        Ok(())
    }

    /// Entry point for `write!(buf, ...)`.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> BufferResult<()> {
        self.append_formatted(args)
    }

    /// Bytes written so far.
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    /// Contents as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Consume the buffer and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many times the storage has been allocated or grown.
    pub fn growth_count(&self) -> usize {
        self.growths
    }

    /// Make room for `space` more bytes plus the terminator headroom.
    fn ensure_space(&mut self, space: usize) -> BufferResult<()> {
        let needed = self
            .data
            .len()
            .checked_add(space)
            .and_then(|n| n.checked_add(1))
            .ok_or(BufferError::AllocationFailure {
                requested: usize::MAX,
            })?;

        if needed <= self.capacity {
            return Ok(());
        }

        let new_capacity = if self.capacity == 0 {
            needed.max(INITIAL_CAPACITY)
        } else {
            needed.max(self.capacity.saturating_mul(2))
        };

        self.data
            .try_reserve_exact(new_capacity - self.data.len())
            .map_err(|_| BufferError::AllocationFailure {
                requested: new_capacity,
            })?;

        tracing::trace!(
            "text buffer grown from {} to {} bytes",
            self.capacity,
            new_capacity
        );

        self.capacity = new_capacity;
        self.growths += 1;
        Ok(())
    }
}

impl Clone for GrowableBuffer {
    /// The copy owns the same capacity it reports.
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
            growths: self.growths,
        }
    }
}

/// Measures rendered length without storing anything.
struct LengthCounter(usize);

impl fmt::Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Writes into already reserved space, refusing to exceed it.
struct BoundedWriter<'a> {
    data: &'a mut Vec<u8>,
    remaining: usize,
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.len() > self.remaining {
            return Err(fmt::Error);
        }
        self.data.extend_from_slice(s.as_bytes());
        self.remaining -= s.len();
        Ok(())
    }
}
