//! Reference [`LineIo`](inikit_doc::LineIo) backends.
//!
//! Two interchangeable implementations of the line contract a
//! [`Document`](inikit_doc::Document) drives:
//! - [`FileLineIo`] — a text file opened for one direction,
//! - [`MemoryLineIo`] — an in-memory list of lines with a rewindable cursor.

pub mod file;
pub mod memory;

pub use file::FileLineIo;
pub use memory::MemoryLineIo;
