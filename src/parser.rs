use csv_async::{AsyncReaderBuilder, StringRecord};
use tokio::io::AsyncRead;
use tracing::debug;

use crate::WorkdayResult;

/// One line of the sheet, cells in file order. Rows may be ragged.
pub type Row = Vec<String>;

/// Read every row from a UTF-8 CSV stream.
///
/// Quoted fields may hold commas, line breaks and `""` escapes. Blank lines,
/// including lines of only spaces, yield no row. Column counts are not
/// checked, so short and long rows come back exactly as written. The first row is returned like any other;
/// see [`split_header`].
pub async fn parse_rows<R>(reader: R) -> WorkdayResult<Vec<Row>>
where
    R: AsyncRead + Unpin + Send,
{
    let mut rdr = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .buffer_capacity(1 << 16)
        .create_reader(reader);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record).await? {
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(rows = rows.len(), "parsed csv");
    Ok(rows)
}

/// Parse CSV held in memory.
pub async fn parse(text: &str) -> WorkdayResult<Vec<Row>> {
    parse_rows(text.as_bytes()).await
}

/// Split off the header row. An empty sheet has an empty header.
pub fn split_header(mut rows: Vec<Row>) -> (Row, Vec<Row>) {
    if rows.is_empty() {
        return (Vec::new(), rows);
    }
    let header = rows.remove(0);
    (header, rows)
}
