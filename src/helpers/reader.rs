use crate::error::IngestError;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;

/// A unified byte source over the inputs a workbook can come from:
/// a local file path, an owned byte buffer, or an arbitrary stream.
///
/// Streams (uploads, sockets) are buffered fully into memory because the
/// ZIP container requires random access.
#[derive(Debug)]
pub enum SourceReader {
    /// Local file reader
    File(BufReader<File>),
    /// In-memory buffer (owned bytes or a drained stream)
    Memory(Cursor<Vec<u8>>),
}

impl SourceReader {
    /// Opens a local file for reading.
    pub fn open_path(path: &str) -> Result<SourceReader, IngestError> {
        let file = File::open(path).map_err(|source| IngestError::SourceIo {
            name: path.to_owned(),
            source,
        })?;
        Ok(SourceReader::File(BufReader::new(file)))
    }

    /// Wraps an owned byte buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> SourceReader {
        SourceReader::Memory(Cursor::new(bytes))
    }

    /// Drains an arbitrary stream into memory.
    /// `name` identifies the source in error messages.
    pub fn from_stream<R: Read>(name: &str, stream: &mut R) -> Result<SourceReader, IngestError> {
        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|source| IngestError::SourceIo {
                name: name.to_owned(),
                source,
            })?;
        Ok(SourceReader::Memory(Cursor::new(bytes)))
    }
}

impl Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            SourceReader::File(reader) => reader.read(buf),
            SourceReader::Memory(reader) => reader.read(buf),
        }
    }
}

impl Seek for SourceReader {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        match self {
            SourceReader::File(reader) => reader.seek(pos),
            SourceReader::Memory(reader) => reader.seek(pos),
        }
    }
}
