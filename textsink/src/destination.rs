use std::io::{self, Write};

/// The byte sink an [`AdaptiveWriter`][crate::AdaptiveWriter] emits into.
///
/// Tracks whether a call into the underlying [`Write`] instance is in progress, so that a writer
/// dropped while unwinding from a panic in that call does not call into it again.
pub(crate) struct Destination<W> {
    write: W,
    panicked: bool,
}

impl<W: Write> Destination<W> {
    pub fn new(write: W) -> Self {
        Destination {
            write,
            panicked: false,
        }
    }

    #[inline]
    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.panicked = true;
        let result = self.write.write_all(bytes);
        self.panicked = false;
        result
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.panicked = true;
        let result = self.write.flush();
        self.panicked = false;
        result
    }

    pub fn panicked(&self) -> bool {
        self.panicked
    }

    pub fn get_ref(&self) -> &W {
        &self.write
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.write
    }
}
