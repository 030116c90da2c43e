use crate::{contact::ContactRecord, CrawlerError};

/// Destination of a flush. Implemented by [`crate::CsvWriter`].
pub trait RecordSink {
    fn write(&self, records: &[ContactRecord]) -> Result<(), CrawlerError>;
}

/// Records extracted since the last successful flush, in extraction order.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    records: Vec<ContactRecord>,
}

impl RecordBuffer {
    pub fn new() -> RecordBuffer {
        RecordBuffer::default()
    }

    pub fn append(&mut self, record: ContactRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Hands every buffered record to `sink` and empties the buffer once the
    /// write is confirmed. On error the buffer is left untouched.
    ///
    /// Returns the number of records written.
    pub fn drain_and_flush<S: RecordSink + ?Sized>(
        &mut self,
        sink: &S,
    ) -> Result<usize, CrawlerError> {
        if self.records.is_empty() {
            return Ok(0);
        }
        sink.write(&self.records)?;
        let written = self.records.len();
        self.records.clear();
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, io};

    #[derive(Default)]
    struct MemorySink {
        batches: RefCell<Vec<Vec<ContactRecord>>>,
    }

    impl RecordSink for MemorySink {
        fn write(&self, records: &[ContactRecord]) -> Result<(), CrawlerError> {
            self.batches.borrow_mut().push(records.to_vec());
            Ok(())
        }
    }

    struct BrokenSink;

    impl RecordSink for BrokenSink {
        fn write(&self, _: &[ContactRecord]) -> Result<(), CrawlerError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    fn record(name: &str) -> ContactRecord {
        ContactRecord::from_raw(name, "Rua A, 1 - Centro 13201-000", "ligarPara('11999990000')")
    }

    #[test]
    fn flush_empty_buffer() {
        let sink = MemorySink::default();
        let mut buffer = RecordBuffer::new();
        assert_eq!(buffer.drain_and_flush(&sink).unwrap(), 0);
        assert!(buffer.is_empty());
        assert!(sink.batches.borrow().is_empty());
    }

    #[test]
    fn flush_single_record() {
        let sink = MemorySink::default();
        let mut buffer = RecordBuffer::new();
        buffer.append(record("a"));
        assert_eq!(buffer.drain_and_flush(&sink).unwrap(), 1);
        assert!(buffer.is_empty());
        assert_eq!(sink.batches.borrow().len(), 1);
    }

    #[test]
    fn flush_keeps_insertion_order() {
        let sink = MemorySink::default();
        let mut buffer = RecordBuffer::new();
        for name in ["a", "b", "c", "d"] {
            buffer.append(record(name));
        }
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.drain_and_flush(&sink).unwrap(), 4);
        assert!(buffer.is_empty());

        let names: Vec<String> = sink.batches.borrow()[0]
            .iter()
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn failed_flush_keeps_records() {
        let mut buffer = RecordBuffer::new();
        buffer.append(record("a"));
        buffer.append(record("b"));
        assert!(buffer.drain_and_flush(&BrokenSink).is_err());
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.records()[1].name, "b");
    }
}
