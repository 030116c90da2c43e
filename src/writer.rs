use crate::{
    buffer::RecordSink,
    contact::{ContactRecord, HEADER},
    CrawlerError,
};
use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Appends records to a comma separated file. The header row is written by
/// the first flush that finds the file empty, so a flush that created the
/// file and then failed still leaves the header to its retry.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> CsvWriter {
        CsvWriter {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn flush(&self, records: &[ContactRecord]) -> Result<(), CrawlerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            debug!("Create {}", self.path.display());
            writer.write_record(HEADER)?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }
}

impl RecordSink for CsvWriter {
    fn write(&self, records: &[ContactRecord]) -> Result<(), CrawlerError> {
        self.flush(records)
    }
}
