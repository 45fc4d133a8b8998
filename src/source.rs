use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

/// A backing document that can only be read front to back.
///
/// The cache never seeks; "starting at offset N" is implemented by opening a
/// fresh reader and discarding the first N characters. Every scan owns its own
/// reader and read position.
pub trait Source {
    type Reader: Read;

    /// Opens a fresh reader positioned at the start of the document.
    fn open(&self) -> io::Result<Self::Reader>;
}

/// A document backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(BufReader::new(File::open(&self.path)?))
    }
}

/// A document held in memory, shared cheaply between scans.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(data: impl AsRef<[u8]>) -> Self {
        Self {
            data: Arc::from(data.as_ref()),
        }
    }
}

impl Source for MemorySource {
    type Reader = Cursor<Arc<[u8]>>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(Cursor::new(self.data.clone()))
    }
}
