use graphload_core::{BulkImportResponse, BulkSink, GraphElement, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Offline sink: appends every element as one JSON line.
///
/// Each batch is flushed to the OS before the call returns, so a crashed run
/// leaves whole batches behind.
pub struct JsonLinesSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, elements: &[GraphElement]) -> Result<()> {
        let mut writer = self.writer.lock();
        for element in elements {
            serde_json::to_writer(&mut *writer, element)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl BulkSink for JsonLinesSink {
    async fn bulk_import(&self, elements: &[GraphElement]) -> Result<BulkImportResponse> {
        self.append(elements)?;
        Ok(BulkImportResponse::accepted(elements.len()))
    }
}
