//! In-memory line I/O over a list of strings.

use inikit_doc::{Direction, LineIo};

/// A rewindable buffer of lines.
///
/// In `Output` mode, writes overwrite in place while the cursor sits before
/// the end, then append. In `Input` mode, reads yield successive stored
/// lines. [`reopen`](MemoryLineIo::reopen) switches direction and rewinds
/// the cursor, clearing the buffer when switching to `Output` — consistent
/// with reopening a file for writing.
#[derive(Debug, Clone)]
pub struct MemoryLineIo {
    lines: Vec<String>,
    cursor: usize,
    direction: Direction,
    open: bool,
}

impl MemoryLineIo {
    pub fn new(direction: Direction) -> Self {
        Self {
            lines: Vec::new(),
            cursor: 0,
            direction,
            open: true,
        }
    }

    pub fn with_capacity(capacity: usize, direction: Direction) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            ..Self::new(direction)
        }
    }

    /// A buffer pre-filled with `lines`, open for input from the start.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::new(Direction::Input)
        }
    }

    /// Switch direction and rewind. Switching to `Output` discards the
    /// stored lines.
    pub fn reopen(&mut self, direction: Direction) {
        if direction == Direction::Output {
            self.lines.clear();
        }
        self.direction = direction;
        self.cursor = 0;
        self.open = true;
    }

    /// The lines currently stored.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn at_end(&self) -> bool {
        self.cursor == self.lines.len()
    }
}

impl LineIo for MemoryLineIo {
    fn read_line(&mut self) -> Option<String> {
        if !self.open || self.direction != Direction::Input || self.at_end() {
            return None;
        }
        let line = self.lines[self.cursor].clone();
        self.cursor += 1;
        Some(line)
    }

    fn write_line(&mut self, line: &str) -> bool {
        if !self.open || self.direction != Direction::Output {
            return false;
        }
        if self.at_end() {
            self.lines.push(line.to_owned());
        } else {
            self.lines[self.cursor] = line.to_owned();
        }
        self.cursor += 1;
        true
    }

    fn is_open(&self, direction: Direction) -> bool {
        self.open && self.direction == direction
    }

    fn close(&mut self) {
        self.open = false;
    }
}
