/// Default length up to which ASCII text is written directly, bypassing the buffer.
pub const DIRECT_THRESHOLD: usize = 256;

/// Default upper bound on the capacity of the lazily allocated encoding buffer.
pub const BUFFER_CAP_MAX: usize = 1024;

/// Configuration for an [`AdaptiveWriter`][crate::AdaptiveWriter].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Config {
    /// ASCII text of at most this many bytes is written directly to the destination.
    /// (Default: [`DIRECT_THRESHOLD`])
    ///
    /// This is also the buffer capacity used when the first buffered write is short.
    pub direct_threshold: usize,
    /// The encoding buffer is never allocated with a capacity above this, unless
    /// [`direct_threshold`][Self#structfield.direct_threshold] is larger.
    /// (Default: [`BUFFER_CAP_MAX`])
    pub max_buffer_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direct_threshold: DIRECT_THRESHOLD,
            max_buffer_capacity: BUFFER_CAP_MAX,
        }
    }
}

impl Config {
    #[inline]
    /// Sets the [`direct_threshold`][Self#structfield.direct_threshold] field.
    pub fn direct_threshold(mut self, value: usize) -> Self {
        self.direct_threshold = value;
        self
    }

    #[inline]
    /// Sets the [`max_buffer_capacity`][Self#structfield.max_buffer_capacity] field.
    pub fn max_buffer_capacity(mut self, value: usize) -> Self {
        self.max_buffer_capacity = value;
        self
    }

    /// Capacity of a buffer allocated for a first buffered write of `len` bytes.
    pub(crate) fn buffer_capacity_for(&self, len: usize) -> usize {
        len.min(self.max_buffer_capacity).max(self.direct_threshold)
    }
}
