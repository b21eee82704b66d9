//! In-memory ZIP assembly for archive-mode delivery.

use std::io::{Cursor, Write};

use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::{errors::Error, Result};

/// Builds the chapter archive in memory, one deflate entry per page.
///
/// Entries are numbered by successful-fetch order (`page_1.jpg`,
/// `page_2.jpg`, ...): a skipped page does not leave a gap.
pub struct ChapterArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entries: usize,
}

impl ChapterArchive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entries: 0,
        }
    }

    pub fn add_page(&mut self, image: &[u8]) -> Result<()> {
        let name = format!("page_{}.jpg", self.entries + 1);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer
            .start_file(name, options)
            .map_err(|e| Error::External(format!("zip error: {e}")))?;
        self.writer.write_all(image)?;
        self.entries += 1;
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Finalize the archive and return the raw ZIP bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| Error::External(format!("zip error: {e}")))?;
        Ok(cursor.into_inner())
    }
}

impl Default for ChapterArchive {
    fn default() -> Self {
        Self::new()
    }
}
