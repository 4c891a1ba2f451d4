use std::io::{self, Write};

use tracing::{debug, trace};

use crate::{destination::Destination, encoding::Encoder, Error};

/// A fixed-capacity buffer of encoded text.
///
/// The buffer is allocated once and never grows: text that does not fit is encoded in pieces, and
/// the buffer is drained into the destination whenever the next piece would overflow it.
pub(crate) struct EncodingBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl EncodingBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        EncodingBuffer {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Writes all buffered bytes to `dest`.
    ///
    /// This leaves the buffer empty, even if an IO error occured.
    pub fn drain_into<W: Write>(&mut self, dest: &mut Destination<W>) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        trace!(len = self.buf.len(), "draining encoding buffer");
        let result = dest.write_all(&self.buf);
        self.buf.clear();
        if let Err(err) = &result {
            debug!(%err, "destination rejected buffered text");
        }
        result
    }

    /// Encodes `text` into the buffer, draining it into `dest` as often as needed.
    pub fn write_str<W: Write, E: Encoder>(
        &mut self,
        dest: &mut Destination<W>,
        encoder: &E,
        text: &str,
    ) -> Result<(), Error> {
        let expansion = E::MAX_EXPANSION.max(1);
        let mut rest = text;
        let mut offset = 0;

        while !rest.is_empty() {
            let spare = self.capacity.saturating_sub(self.buf.len());
            let mut split = floor_char_boundary(rest, spare / expansion);
            if split == 0 {
                self.drain_into(dest)?;
                split = floor_char_boundary(rest, self.capacity / expansion);
                // Only reachable with a buffer too small for a single character, in which case we
                // let it grow rather than stall.
                if split == 0 {
                    split = rest.chars().next().map_or(rest.len(), char::len_utf8);
                }
            }

            let (piece, tail) = rest.split_at(split);
            encoder.encode(piece, &mut self.buf).map_err(|mut err| {
                err.offset += offset;
                err
            })?;

            offset += split;
            rest = tail;
        }
        Ok(())
    }
}

/// Largest char boundary of `text` that is at most `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        text.len()
    } else {
        (0..=index)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::encoding::{EncodeError, Latin1, Utf8};

    #[test]
    fn floor_boundary_never_splits_chars() {
        let text = "a€b";
        assert_eq!(floor_char_boundary(text, 0), 0);
        assert_eq!(floor_char_boundary(text, 1), 1);
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(floor_char_boundary(text, 3), 1);
        assert_eq!(floor_char_boundary(text, 4), 4);
        assert_eq!(floor_char_boundary(text, 100), 5);
    }

    #[test]
    fn small_text_stays_buffered() {
        let mut dest = Destination::new(vec![]);
        let mut buffer = EncodingBuffer::with_capacity(16);

        buffer.write_str(&mut dest, &Utf8, "日本").unwrap();
        assert_eq!(buffer.len(), 6);
        assert!(dest.get_ref().is_empty());

        buffer.drain_into(&mut dest).unwrap();
        assert_eq!(buffer.len(), 0);
        assert_eq!(dest.get_ref(), "日本".as_bytes());
    }

    #[test]
    fn large_text_is_split_without_growing() {
        let text = "€".repeat(100);
        let mut dest = Destination::new(vec![]);
        let mut buffer = EncodingBuffer::with_capacity(16);

        buffer.write_str(&mut dest, &Utf8, &text).unwrap();
        assert!(buffer.len() <= 16);
        assert_eq!(buffer.capacity(), 16);

        buffer.drain_into(&mut dest).unwrap();
        assert_eq!(dest.get_ref(), text.as_bytes());
    }

    #[test]
    fn empty_drain_writes_nothing() {
        struct CountingWrites(usize);

        impl Write for CountingWrites {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0 += 1;
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut dest = Destination::new(CountingWrites(0));
        let mut buffer = EncodingBuffer::with_capacity(16);
        buffer.drain_into(&mut dest).unwrap();
        assert_eq!(dest.get_ref().0, 0);
    }

    #[test]
    fn encode_error_offset_is_relative_to_whole_text() {
        let text = format!("{}€", "a".repeat(40));
        let mut dest = Destination::new(vec![]);
        let mut buffer = EncodingBuffer::with_capacity(16);

        let err = buffer.write_str(&mut dest, &Latin1, &text).unwrap_err();
        assert_matches!(
            err,
            Error::Encode(EncodeError {
                character: '€',
                offset: 40,
                ..
            })
        );
    }
}
