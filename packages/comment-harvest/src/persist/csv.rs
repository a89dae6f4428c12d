//! CSV artifact with one header row and every field quoted.

use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{PersistenceError, PersistenceResult};
use crate::types::record::CommentRecord;

/// Column headers, in order.
pub const CSV_HEADERS: [&str; 4] = [
    "Student Name",
    "Original Comment",
    "Translated Comment",
    "Timestamp",
];

/// Write `records` as CSV to `path`.
pub fn write_csv(path: &Path, records: &[CommentRecord]) -> PersistenceResult<()> {
    let file = File::create(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_records(file, records)?;
    Ok(())
}

/// Write `records` as CSV to any writer.
///
/// Fields are always quoted and embedded quotes are doubled.
pub fn write_records<W: Write>(out: W, records: &[CommentRecord]) -> PersistenceResult<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(CSV_HEADERS)?;

    for record in records {
        let timestamp = record
            .timestamp()
            .to_rfc3339_opts(SecondsFormat::AutoSi, true);
        writer.write_record([
            record.student_name(),
            record.original_comment(),
            record.output_comment(),
            timestamp.as_str(),
        ])?;
    }

    writer.flush().map_err(|e| PersistenceError::Csv(e.into()))?;
    Ok(())
}
