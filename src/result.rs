//! Error types and the related `Result<T>`

use std::fmt;
use std::io;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use thiserror::Error;

pub type PakResult<T> = Result<T, PakError>;

/// Which part of a directory record we were reading when I/O failed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReadKind {
    /// The little-endian 32-bit offset that starts every record
    Offset,
    /// The null-terminated name that follows the offset
    Filename,
}

impl fmt::Display for ReadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadKind::Offset => f.write_str("file offset"),
            ReadKind::Filename => f.write_str("file name"),
        }
    }
}

/// What we asked the stream to do when it failed us
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StreamOp {
    /// Seeking to the end to learn the archive's total length
    Length,
    /// Seeking to the given file offset
    Seek(u32),
}

impl fmt::Display for StreamOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamOp::Length => f.write_str("get length of archive"),
            StreamOp::Seek(offset) => write!(f, "seek to file offset {offset:08x}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PakError {
    /// The stream failed (or ran out) while reading the directory.
    #[error("failed to read {kind}")]
    Read {
        kind: ReadKind,
        #[source]
        source: io::Error,
    },

    /// A record's offset was smaller than the one before it.
    #[error("files seem out of order: last offset = {last:08x}, this offset = {this:08x}")]
    OutOfOrder { last: u32, this: u32 },

    /// A name ran past twelve bytes without hitting its terminator.
    #[error("filename too long for record at offset {offset:08x}")]
    NameTooLong { offset: u32 },

    /// The output directory doesn't exist or isn't a directory.
    /// `source` is set when we couldn't even stat it.
    #[error("output path {path} is not a usable directory")]
    Destination {
        path: Utf8PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    /// Seeking around the archive failed
    #[error("failed to {op}")]
    Stream {
        op: StreamOp,
        #[source]
        source: io::Error,
    },

    /// Creating or filling an output file failed
    #[error("error extracting to {path:?}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
