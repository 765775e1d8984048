//! The line I/O capability contract.
//!
//! A [`Document`](crate::Document) never touches files or buffers directly;
//! it drives an abstract producer/consumer of text lines. Backends track
//! their own cursor and open mode, and are used by one document at a time.

/// Transfer direction a backend is opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// One line in, one line out.
///
/// Lines cross this boundary without terminators: `read_line` strips them,
/// `write_line` appends whatever terminator the backend uses.
pub trait LineIo {
    /// Next line of input, or `None` at end of input (or when the backend is
    /// not open for input).
    fn read_line(&mut self) -> Option<String>;

    /// Append one line of output. Returns `false` when the backend rejects
    /// the line (not open for output, or the underlying write failed).
    fn write_line(&mut self, line: &str) -> bool;

    /// Whether the backend is currently open for the given direction.
    fn is_open(&self, direction: Direction) -> bool;

    /// Release the backend's underlying resource.
    ///
    /// Closing is infallible: every `write_line` already reports its own
    /// outcome, so a failure while releasing carries no information the
    /// caller could act on and is discarded.
    fn close(&mut self);
}
