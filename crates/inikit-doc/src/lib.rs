//! INI document engine
//!
//! This crate models a hierarchical key/value configuration document (named
//! groups of ordered `key=value` entries) and converts it to and from a
//! line-oriented textual form.
//!
//! The crate is deliberately split along the format's seams:
//! - [`line`] — the stateless line classifier (comment / group header /
//!   key-value / unrecognized, plus the quote-trimming rule),
//! - [`resolve`] — dotted-key resolution under an ambient group cursor,
//! - [`document`] — the mutable group/value store and its read/write
//!   orchestration,
//! - [`io`] — the `LineIo` capability trait the document drives; concrete
//!   backends live in `inikit-io`.

pub mod document;
pub mod io;
pub mod line;
pub mod resolve;

pub use document::{DocError, Document, Values};
pub use io::{Direction, LineIo};
pub use line::{classify_line, ParsedLine};
pub use resolve::resolve_key;
