use std::{
    fmt,
    io::{self, Write},
};

use tracing::trace;

use crate::{
    config::Config,
    destination::Destination,
    encoding::{self, Encoder},
    encoding_buffer::EncodingBuffer,
    Error,
};

/// A text writer that picks, per call, between writing directly and buffering.
///
/// Short ASCII text and ASCII characters are written straight to the destination without any
/// allocation or copying. Everything else (text longer than
/// [`Config::direct_threshold`][crate::Config#structfield.direct_threshold] or containing
/// non-ASCII characters) goes through an encoding buffer that is allocated on first use and kept
/// for the lifetime of the writer.
///
/// Bytes always reach the destination in the order of the write calls. Before anything is written
/// directly, pending buffered text is written out first.
///
/// The writer does not take responsibility for the destination beyond writing to it. To use a
/// destination that outlives the writer, pass a `&mut W`. Owners are expected to call
/// [`flush`][Self::flush] when done and to check its result. Dropping the writer writes out any
/// buffered text, but errors occuring at that point are lost.
///
/// The encoder must be ASCII-transparent, see [`Encoder`].
pub struct AdaptiveWriter<W: Write, E: Encoder> {
    dest: Destination<W>,
    encoder: E,
    config: Config,
    buffer: BufferSlot,
}

/// Storage for the lazily allocated encoding buffer.
enum BufferSlot {
    Unallocated,
    Allocated {
        buffer: EncodingBuffer,
        state: FlushState,
    },
}

/// Whether the buffer may hold bytes that did not reach the destination yet.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum FlushState {
    Idle,
    Pending,
}

impl BufferSlot {
    /// Returns the buffer, allocating it with `capacity` bytes if it does not exist yet.
    fn get_or_allocate(&mut self, capacity: usize) -> (&mut EncodingBuffer, &mut FlushState) {
        if matches!(self, BufferSlot::Unallocated) {
            trace!(capacity, "allocating encoding buffer");
            *self = BufferSlot::Allocated {
                buffer: EncodingBuffer::with_capacity(capacity),
                state: FlushState::Idle,
            };
        }
        match self {
            BufferSlot::Allocated { buffer, state } => (buffer, state),
            BufferSlot::Unallocated => unreachable!("encoding buffer was just allocated"),
        }
    }
}

impl<W: Write, E: Encoder> AdaptiveWriter<W, E> {
    /// Creates an [`AdaptiveWriter`] using the default [`Config`].
    pub fn new(write: W, encoder: E) -> Self {
        Self::with_config(write, encoder, Config::default())
    }

    /// Creates an [`AdaptiveWriter`] with a custom [`Config`].
    ///
    /// # Panics
    ///
    /// In debug builds, this panics if `encoder` is not ASCII-transparent.
    pub fn with_config(write: W, encoder: E, config: Config) -> Self {
        debug_assert!(
            encoding::is_ascii_transparent(&encoder),
            "encoder for {} is not ASCII-transparent",
            encoder.name()
        );
        AdaptiveWriter {
            dest: Destination::new(write),
            encoder,
            config,
            buffer: BufferSlot::Unallocated,
        }
    }

    /// Writes a string.
    ///
    /// Writing an empty string does nothing. ASCII text of at most
    /// [`direct_threshold`][crate::Config#structfield.direct_threshold] bytes is written to the
    /// destination before this returns. Other text may remain buffered until the next
    /// [`flush`][Self::flush] or the next directly written text.
    #[inline]
    pub fn write_str(&mut self, text: &str) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }
        if text.len() <= self.config.direct_threshold && text.is_ascii() {
            // For an ASCII-transparent encoder, ASCII text is its own encoding.
            self.write_direct(text.as_bytes())
        } else {
            self.write_buffered(text)
        }
    }

    /// Writes a single character.
    ///
    /// ASCII characters are written to the destination as a single byte without touching the
    /// buffer, everything else is buffered.
    #[inline]
    pub fn write_char(&mut self, ch: char) -> Result<(), Error> {
        if ch.is_ascii() {
            self.write_direct(&[ch as u8])
        } else {
            let mut char_buf = [0; 4];
            self.write_buffered(ch.encode_utf8(&mut char_buf))
        }
    }

    /// Writes formatted text, allowing the use of [`write!`] and [`writeln!`].
    ///
    /// Each fragment produced by the formatting machinery is written as if passed to
    /// [`write_str`][Self::write_str].
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        if let Some(text) = args.as_str() {
            return self.write_str(text);
        }

        struct Adapter<'a, W: Write, E: Encoder> {
            inner: &'a mut AdaptiveWriter<W, E>,
            error: Option<Error>,
        }

        impl<W: Write, E: Encoder> fmt::Write for Adapter<'_, W, E> {
            fn write_str(&mut self, text: &str) -> fmt::Result {
                self.inner.write_str(text).map_err(|err| {
                    self.error = Some(err);
                    fmt::Error
                })
            }

            fn write_char(&mut self, ch: char) -> fmt::Result {
                self.inner.write_char(ch).map_err(|err| {
                    self.error = Some(err);
                    fmt::Error
                })
            }
        }

        let mut adapter = Adapter {
            inner: self,
            error: None,
        };
        match fmt::write(&mut adapter, args) {
            Ok(()) => Ok(()),
            Err(fmt::Error) => Err(adapter.error.unwrap_or_else(|| {
                Error::Io(io::Error::new(io::ErrorKind::Other, "formatter error"))
            })),
        }
    }

    /// Writes out all buffered text and flushes the destination.
    ///
    /// Calling this repeatedly without writing in between does not write anything more.
    pub fn flush(&mut self) -> Result<(), Error> {
        if let BufferSlot::Allocated { buffer, state } = &mut self.buffer {
            *state = FlushState::Idle;
            buffer.drain_into(&mut self.dest)?;
        }
        self.dest.flush()?;
        Ok(())
    }

    /// Returns the capacity of the encoding buffer, or `None` if it was not allocated yet.
    pub fn buffer_capacity(&self) -> Option<usize> {
        match &self.buffer {
            BufferSlot::Unallocated => None,
            BufferSlot::Allocated { buffer, .. } => Some(buffer.capacity()),
        }
    }

    /// Returns the number of encoded bytes currently held in the encoding buffer.
    pub fn buffered_len(&self) -> usize {
        match &self.buffer {
            BufferSlot::Unallocated => 0,
            BufferSlot::Allocated { buffer, .. } => buffer.len(),
        }
    }

    /// Returns whether buffered text may not have reached the destination yet.
    pub fn is_flush_pending(&self) -> bool {
        matches!(
            self.buffer,
            BufferSlot::Allocated {
                state: FlushState::Pending,
                ..
            }
        )
    }

    /// Returns a reference to the destination.
    pub fn get_ref(&self) -> &W {
        self.dest.get_ref()
    }

    /// Returns a mutable reference to the destination.
    ///
    /// Bytes written through this reference bypass the writer and can end up before text that
    /// was written to the writer earlier but is still buffered.
    pub fn get_mut(&mut self) -> &mut W {
        self.dest.get_mut()
    }

    /// Returns the encoder in use.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes bytes that need no encoding, after writing out any pending buffered text.
    #[inline]
    pub(crate) fn write_direct(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.drain_pending()?;
        self.dest.write_all(bytes)?;
        Ok(())
    }

    fn write_buffered(&mut self, text: &str) -> Result<(), Error> {
        let capacity = self
            .config
            .buffer_capacity_for(text.len())
            .max(4 * E::MAX_EXPANSION.max(1));
        let (buffer, state) = self.buffer.get_or_allocate(capacity);
        *state = FlushState::Pending;
        buffer.write_str(&mut self.dest, &self.encoder, text)
    }

    fn drain_pending(&mut self) -> io::Result<()> {
        if let BufferSlot::Allocated { buffer, state } = &mut self.buffer {
            if *state == FlushState::Pending {
                *state = FlushState::Idle;
                buffer.drain_into(&mut self.dest)?;
            }
        }
        Ok(())
    }
}

impl<W: Write, E: Encoder> Drop for AdaptiveWriter<W, E> {
    fn drop(&mut self) {
        if !self.dest.panicked() {
            let _ = self.drain_pending();
        }
    }
}
