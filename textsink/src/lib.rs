//! The textsink crate provides [`AdaptiveWriter`], a text writer for serializers that emit lots of
//! short, mostly-ASCII fragments into a byte-oriented destination.
//!
//! A general purpose buffered text writer pays for an encoding buffer and a copy on every call.
//! For output like CSV or JSON, most calls write a delimiter, a short number or a short name, all
//! of which are ASCII and already in their final encoded form for any ASCII-transparent encoding.
//! [`AdaptiveWriter`] takes advantage of this:
//!
//! * _Direct path_: ASCII text up to
//!   [`Config::direct_threshold`][Config#structfield.direct_threshold] bytes (256 by default) and
//!   single ASCII characters are written to the destination right away, without allocating or
//!   encoding anything.
//!
//! * _Buffered path_: longer text and text containing non-ASCII characters is passed through the
//!   [`Encoder`] into an encoding buffer. That buffer is allocated on first use, sized after the
//!   text that triggered it (at most
//!   [`Config::max_buffer_capacity`][Config#structfield.max_buffer_capacity] bytes, 1024 by
//!   default) and then kept for the lifetime of the writer.
//!
//! Output order always matches call order: before anything is written directly, pending buffered
//! text is written out.
//!
//! ## Using textsink
//!
//! ```rust
//! use textsink::{AdaptiveWriter, Utf8};
//!
//! # fn main() -> Result<(), textsink::Error> {
//! let mut output = vec![];
//! {
//!     let mut writer = AdaptiveWriter::new(&mut output, Utf8);
//!     writer.write_str("id,")?;
//!     writer.write_str("日本語")?;
//!     writer.write_char(',')?;
//!     textsink::write::text::ascii_digits(&mut writer, 42)?;
//!     writer.flush()?;
//! }
//! assert_eq!(output, "id,日本語,42".as_bytes());
//! # Ok(())
//! # }
//! ```
//!
//! The writer never closes the destination. Owners should call [`AdaptiveWriter::flush`] once
//! they are done writing, as errors can only be reported that way.

#![warn(missing_docs)]
mod adaptive_writer;
mod config;
mod destination;
pub mod encoding;
mod encoding_buffer;
mod error;
pub mod write;


pub use adaptive_writer::AdaptiveWriter;
pub use config::{Config, BUFFER_CAP_MAX, DIRECT_THRESHOLD};
pub use encoding::{EncodeError, Encoder, Latin1, Utf8};
pub use error::Error;
