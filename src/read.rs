//! Tools for reading a PAK archive.
//!
//! [`parse_directory()`] reads the table at the front of the archive,
//! and [`extract_all()`] dumps every file it names into a directory.
//! [`PakArchive`] bundles the two up with a stream you own.
//!
//! [`parse_directory()`]: fn.parse_directory.html
//! [`extract_all()`]: fn.extract_all.html
//! [`PakArchive`]: struct.PakArchive.html

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use camino::Utf8Path;
use log::*;

use crate::result::*;
use crate::spec;

/// An entry in the archive's directory table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Where the file's contents start in the archive
    pub offset: u32,

    /// The file's (8.3) name, exactly as the archive stores it
    pub filename: Vec<u8>,
}

impl Record {
    /// The file's name, decoded from CP437 for display
    pub fn name(&self) -> Cow<'_, str> {
        spec::display_filename(&self.filename)
    }

    /// Where this file goes when extracted into `dir`.
    ///
    /// The name's bytes are used as-is, with no sanitizing.
    pub fn path_in(&self, dir: &Utf8Path) -> PathBuf {
        dir.as_std_path().join(spec::os_filename(&self.filename))
    }
}

/// Reads the directory table from the current position of `reader`,
/// which should be the start of the archive.
///
/// Stops right after the terminating zero offset, so no file contents
/// are ever consumed. Offsets must never decrease; they're how we know
/// where each file ends.
pub fn parse_directory<R: Read>(reader: &mut R) -> PakResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut last_offset = 0;

    loop {
        let offset = spec::read_offset(reader)?;
        if offset == spec::SENTINEL {
            break;
        }
        if offset < last_offset {
            return Err(PakError::OutOfOrder {
                last: last_offset,
                this: offset,
            });
        }
        last_offset = offset;

        let filename = spec::read_filename(reader, offset)?;
        let record = Record { offset, filename };
        trace!("{:?}", record);
        records.push(record);
    }

    debug!("{} entries in directory", records.len());
    Ok(records)
}

/// Pairs each record with the length of its contents.
///
/// A file runs until the next one starts, and the last one runs to
/// `stream_len`. Two records at the same offset make an empty file.
/// If the last record starts past `stream_len`, it's empty too.
pub fn file_spans(records: &[Record], stream_len: u64) -> impl Iterator<Item = (&Record, u64)> {
    records.iter().enumerate().map(move |(i, record)| {
        let end = records
            .get(i + 1)
            .map_or(stream_len, |next| u64::from(next.offset));
        (record, end.saturating_sub(u64::from(record.offset)))
    })
}

/// Finds the total length of the stream by seeking to its end.
pub fn stream_len<S: Seek>(stream: &mut S) -> PakResult<u64> {
    stream
        .seek(SeekFrom::End(0))
        .map_err(|source| PakError::Stream {
            op: StreamOp::Length,
            source,
        })
}

fn seek_to<S: Seek>(stream: &mut S, offset: u32) -> PakResult<()> {
    stream
        .seek(SeekFrom::Start(u64::from(offset)))
        .map_err(|source| PakError::Stream {
            op: StreamOp::Seek(offset),
            source,
        })?;
    Ok(())
}

/// Makes sure `dir` exists and is a directory.
fn check_destination(dir: &Utf8Path) -> PakResult<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PakError::Destination {
            path: dir.to_owned(),
            source: None,
        }),
        Err(e) => Err(PakError::Destination {
            path: dir.to_owned(),
            source: Some(e),
        }),
    }
}

/// True if joining `name` onto a directory stays directly inside it.
///
/// Names are joined as-is, so we only warn about ones that don't.
fn is_plain_name(name: &[u8]) -> bool {
    !matches!(name, b"" | b"." | b"..") && !name.iter().any(|&b| matches!(b, b'/' | b'\\'))
}

/// Extracts every file in the archive into `dir`,
/// overwriting anything with the same name.
///
/// `reader` should be at the start of the archive.
/// Stops at the first error; files written before it stay on disk.
pub fn extract_all<R, P>(reader: &mut R, dir: P) -> PakResult<()>
where
    R: Read + Seek,
    P: AsRef<Utf8Path>,
{
    let dir = dir.as_ref();
    check_destination(dir)?;

    let records = parse_directory(reader)?;
    let len = stream_len(reader)?;
    if let Some(last) = records.last() {
        if u64::from(last.offset) > len {
            warn!(
                "{} starts at {:08x}, past the end of the archive ({:08x})",
                last.name(),
                last.offset,
                len
            );
        }
    }

    for (record, span) in file_spans(&records, len) {
        if !is_plain_name(&record.filename) {
            warn!("{:?} isn't a plain file name; extracting anyway", record.name());
        }
        let path = record.path_in(dir);
        debug!(
            "Extracting {} bytes at {:08x} to {}",
            span,
            record.offset,
            path.display()
        );
        seek_to(reader, record.offset)?;
        save_to_file(reader, span, &path)?;
    }
    Ok(())
}

/// Copies exactly `span` bytes from `reader` into a new file at `path`.
fn save_to_file<R: Read>(reader: &mut R, span: u64, path: &Path) -> PakResult<()> {
    let extraction_error = |source: io::Error| PakError::Extraction {
        path: path.to_owned(),
        source,
    };

    let mut sink = File::create(path).map_err(extraction_error)?;
    let copied = io::copy(&mut reader.by_ref().take(span), &mut sink).map_err(extraction_error)?;
    if copied < span {
        return Err(extraction_error(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("archive ended {} bytes early", span - copied),
        )));
    }
    Ok(())
}

/// A PAK archive to be read
///
/// Wraps a seekable stream you provide (a `BufReader<File>` is a good bet).
/// Nothing is cached; each call rereads the directory from the start.
pub struct PakArchive<R> {
    reader: R,
}

impl<R: Read + Seek> PakArchive<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the entries in the archive's directory, in file order.
    pub fn entries(&mut self) -> PakResult<Vec<Record>> {
        seek_to(&mut self.reader, 0)?;
        parse_directory(&mut self.reader)
    }

    /// Returns the entries in the archive's directory along with
    /// the length of each one's contents.
    pub fn files(&mut self) -> PakResult<Vec<(Record, u64)>> {
        let records = self.entries()?;
        let len = stream_len(&mut self.reader)?;
        Ok(file_spans(&records, len)
            .map(|(record, span)| (record.clone(), span))
            .collect())
    }

    /// Reads a single file from the archive,
    /// given its record and span from [`files()`](#method.files).
    pub fn read(&mut self, record: &Record, span: u64) -> PakResult<io::Take<&mut R>> {
        debug!("Reading {} ({} bytes)", record.name(), span);
        seek_to(&mut self.reader, record.offset)?;
        Ok(self.reader.by_ref().take(span))
    }

    /// Extracts every file in the archive into `dir`.
    /// See [`extract_all()`](fn.extract_all.html).
    pub fn extract_all<P: AsRef<Utf8Path>>(&mut self, dir: P) -> PakResult<()> {
        seek_to(&mut self.reader, 0)?;
        extract_all(&mut self.reader, dir)
    }

    /// Gives back the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
