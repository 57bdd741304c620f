use crate::error::Result;
use crate::icondir::{self, IconImageDescriptor};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

//===========================================================================//

trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

//===========================================================================//

/// An open ICO file (or an in-memory stand-in for one).
///
/// Registered `RT_ICON` payloads are views into their source that are only
/// read when the resource table is serialized, so a source stays open for as
/// long as anything refers to it.  Sources are shared through `Arc`; the
/// underlying reader sits behind a mutex so that views on different threads
/// can each seek and read.
pub struct IconSource {
    name: String,
    reader: Mutex<Box<dyn ReadSeek>>,
}

impl IconSource {
    /// Opens an ICO file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<IconSource> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(IconSource::from_reader(
            path.display().to_string(),
            BufReader::new(file),
        ))
    }

    /// Wraps any seekable reader, such as a `Cursor` over ICO bytes.
    pub fn from_reader<R>(name: impl Into<String>, reader: R) -> IconSource
    where
        R: Read + Seek + Send + 'static,
    {
        IconSource { name: name.into(), reader: Mutex::new(Box::new(reader)) }
    }

    /// Returns a human-readable name for the source (its path, for files).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the total length of the source, in bytes.
    pub fn byte_len(&self) -> Result<u64> {
        Ok(self.lock().seek(SeekFrom::End(0))?)
    }

    /// Reads the ICO directory from the start of the source.
    pub fn decode_headers(&self) -> Result<Vec<IconImageDescriptor>> {
        let mut reader = self.lock();
        reader.seek(SeekFrom::Start(0))?;
        icondir::decode_headers(&mut *reader)
    }

    /// Reads `len` bytes starting at `offset`.
    pub fn read_range(&self, offset: u64, len: u64) -> Result<Vec<u8>> {
        let mut reader = self.lock();
        reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; len as usize];
        reader.read_exact(&mut data)?;
        Ok(data)
    }

    /// Returns a lazy view of the bytes `[offset, offset + len)`.
    pub fn section(self: &Arc<Self>, offset: u64, len: u64) -> FileSection {
        FileSection { source: Arc::clone(self), offset, len }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn ReadSeek>> {
        self.reader.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for IconSource {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_struct("IconSource").field("name", &self.name).finish()
    }
}

//===========================================================================//

/// A byte range of an [`IconSource`], read on demand.
#[derive(Clone, Debug)]
pub struct FileSection {
    source: Arc<IconSource>,
    offset: u64,
    len: u64,
}

impl FileSection {
    /// Returns the source this section is a view into.
    pub fn source(&self) -> &Arc<IconSource> {
        &self.source
    }

    /// Returns the byte offset of the section within its source.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the length of the section, in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the section covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the section's bytes from its source.
    pub fn read_to_vec(&self) -> Result<Vec<u8>> {
        self.source.read_range(self.offset, self.len)
    }
}

//===========================================================================//


//===========================================================================//
