//! Text encodings an [`AdaptiveWriter`][crate::AdaptiveWriter] can emit.
//!
//! The writer does not implement any encoding itself, it is parameterized by an [`Encoder`]. Two
//! encoders are provided, [`Utf8`] and [`Latin1`].
use thiserror::Error;

/// A character could not be represented in the target encoding.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("cannot encode {character:?} at byte offset {offset} as {encoding}")]
pub struct EncodeError {
    /// The character that has no representation in the target encoding.
    pub character: char,
    /// Byte offset of `character` within the text passed to the failing write call.
    pub offset: usize,
    /// Name of the target encoding.
    pub encoding: &'static str,
}

/// Conversion from text to bytes.
///
/// # ASCII transparency
///
/// Implementations must be _ASCII-transparent_: every character below U+0080 has to encode to
/// exactly one byte equal to its code point. [`AdaptiveWriter`][crate::AdaptiveWriter] writes
/// short ASCII text without consulting the encoder at all, so an encoder violating this will
/// produce mixed output. Debug builds check this when a writer is constructed.
pub trait Encoder {
    /// Upper bound on the number of output bytes produced for a single byte of UTF-8 input.
    ///
    /// The writer relies on this to split text into pieces that fit into its fixed-size buffer.
    const MAX_EXPANSION: usize = 1;

    /// Name of the encoding, used in error messages.
    fn name(&self) -> &'static str;

    /// Appends the encoding of `text` to `out`.
    ///
    /// On error, `out` may contain the encoding of a prefix of `text`.
    fn encode(&self, text: &str, out: &mut Vec<u8>) -> Result<(), EncodeError>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    const MAX_EXPANSION: usize = E::MAX_EXPANSION;

    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn encode(&self, text: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        (**self).encode(text, out)
    }
}

/// UTF-8, i.e. the bytes of the Rust string as they are.
#[derive(Copy, Clone, Default, Debug)]
pub struct Utf8;

impl Encoder for Utf8 {
    fn name(&self) -> &'static str {
        "UTF-8"
    }

    #[inline]
    fn encode(&self, text: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(text.as_bytes());
        Ok(())
    }
}

/// ISO-8859-1, mapping U+0000 to U+00FF onto single bytes and rejecting everything else.
#[derive(Copy, Clone, Default, Debug)]
pub struct Latin1;

impl Encoder for Latin1 {
    fn name(&self) -> &'static str {
        "ISO-8859-1"
    }

    fn encode(&self, text: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        for (offset, character) in text.char_indices() {
            match u8::try_from(u32::from(character)) {
                Ok(byte) => out.push(byte),
                Err(_) => {
                    return Err(EncodeError {
                        character,
                        offset,
                        encoding: self.name(),
                    })
                }
            }
        }
        Ok(())
    }
}

/// Checks that `encoder` maps every ASCII character onto the matching single byte.
pub(crate) fn is_ascii_transparent(encoder: &impl Encoder) -> bool {
    let mut out = Vec::with_capacity(1);
    (0u8..0x80).all(|byte| {
        out.clear();
        let mut char_buf = [0; 4];
        let text = char::from(byte).encode_utf8(&mut char_buf);
        encoder.encode(text, &mut out).is_ok() && out == [byte]
    })
}
