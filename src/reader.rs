//! Streaming CSV input.
//!
//! [`TransactionReader`] pulls one row at a time from any `Read`, so inputs
//! larger than memory can be processed. Row problems become
//! [`RecordError::MalformedRecord`]s; only I/O failures end the stream.

use crate::error::{EngineError, RecordError, Result};
use crate::transaction::{Transaction, TransactionRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// Columns: type, client, tx and the optional amount.
const MIN_FIELDS: usize = 3;
const MAX_FIELDS: usize = 4;

/// One input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-indexed line of the row; the header is line 1.
    pub line: u64,
    pub parsed: std::result::Result<Transaction, RecordError>,
}

/// Iterator over the rows of a transaction CSV.
///
/// Yields `Err` at most once, for a fatal read failure, and then stops.
pub struct TransactionReader<R> {
    inner: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
    line: u64,
    done: bool,
}

impl<R: Read> TransactionReader<R> {
    /// Wraps `reader` and consumes the header row.
    pub fn new(reader: R) -> Result<Self> {
        let mut inner = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = inner.headers()?.clone();

        Ok(TransactionReader {
            inner,
            headers,
            record: StringRecord::new(),
            line: 1,
            done: false,
        })
    }

    fn parse_current(&self) -> std::result::Result<Transaction, RecordError> {
        let fields = self.record.len();
        if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields) {
            return Err(RecordError::malformed(format!(
                "expected {} or {} fields, found {}",
                MIN_FIELDS, MAX_FIELDS, fields
            )));
        }

        let raw: TransactionRecord = self
            .record
            .deserialize(Some(&self.headers))
            .map_err(|e| RecordError::malformed(e.to_string()))?;
        raw.parse()
    }
}

impl<R: Read> Iterator for TransactionReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.inner.read_record(&mut self.record) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                self.line = self
                    .record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(self.line + 1);
                Some(Ok(Row {
                    line: self.line,
                    parsed: self.parse_current(),
                }))
            }
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                self.done = true;
                Some(Err(EngineError::Csv(e)))
            }
            Err(e) => {
                self.line = e.position().map(|p| p.line()).unwrap_or(self.line + 1);
                Some(Ok(Row {
                    line: self.line,
                    parsed: Err(RecordError::malformed(e.to_string())),
                }))
            }
        }
    }
}
