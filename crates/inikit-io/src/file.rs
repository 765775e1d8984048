//! File-backed line I/O.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use inikit_doc::{Direction, LineIo};

/// A text file opened for one transfer direction.
///
/// Reading strips `\n` / `\r\n` terminators; writing appends a `\n` and
/// reports whether the underlying write (including a flush) succeeded.
pub struct FileLineIo {
    reader: Option<BufReader<File>>,
    writer: Option<BufWriter<File>>,
}

impl FileLineIo {
    /// Open `path` for the given direction. Output mode truncates, creating
    /// the file if needed.
    pub fn open(path: impl AsRef<Path>, direction: Direction) -> io::Result<Self> {
        match direction {
            Direction::Input => {
                let file = File::open(path)?;
                Ok(Self {
                    reader: Some(BufReader::new(file)),
                    writer: None,
                })
            }
            Direction::Output => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)?;
                Ok(Self {
                    reader: None,
                    writer: Some(BufWriter::new(file)),
                })
            }
        }
    }
}

impl LineIo for FileLineIo {
    fn read_line(&mut self) -> Option<String> {
        let reader = self.reader.as_mut()?;
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
        }
    }

    fn write_line(&mut self, line: &str) -> bool {
        let Some(writer) = self.writer.as_mut() else {
            return false;
        };
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .is_ok()
    }

    fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Input => self.reader.is_some(),
            Direction::Output => self.writer.is_some(),
        }
    }

    fn close(&mut self) {
        self.reader = None;
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
