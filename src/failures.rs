/// One CSV row that failed during import, kept together with the headers it
/// was read under so it can be replayed against the importer later.
#[derive(Debug, Clone)]
pub struct FailedRow {
    pub headers: StringRecord,
    pub record: StringRecord,
}

/// Collects failed rows from both importers, in encounter order.
#[derive(Debug, Default)]
pub struct FailureLog {
    rows: Vec<FailedRow>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, headers: &StringRecord, record: &StringRecord) {
        self.rows.push(FailedRow {
            headers: headers.clone(),
            record: record.clone(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Writes every failed row to a CSV at `path`.
    ///
    /// The first failed row's headers become the file's header line. Rows
    /// from a file with different headers are realigned by column name, with
    /// an empty field where a row has no matching column. Writes nothing when
    /// the log is empty.
    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let Some(first) = self.rows.first() else {
            return Ok(());
        };

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Could not create failure file at '{}'", path.display()))?;
        writer.write_record(&first.headers)?;

        for row in &self.rows {
            let fields: Vec<&str> = first
                .headers
                .iter()
                .map(|column| field_by_name(row, column).unwrap_or(""))
                .collect();
            writer.write_record(&fields)?;
        }

        writer
            .flush()
            .with_context(|| format!("Could not flush failure file at '{}'", path.display()))?;

        Ok(())
    }
}

fn field_by_name<'a>(row: &'a FailedRow, column: &str) -> Option<&'a str> {
    let index = row.headers.iter().position(|header| header == column)?;
    row.record.get(index)
}

use anyhow::Context;
use csv::StringRecord;
use std::path::Path;

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn writes_rows_under_the_first_rows_headers() {
        let mut log = FailureLog::new();
        log.push(
            &record(&["ID", "Title", "URL"]),
            &record(&["7", "Two Sum", "/problems/two-sum/"]),
        );
        // A failure from the other export, different column set.
        log.push(
            &record(&["Title", "Link"]),
            &record(&["Rotate Array", "https://example.com/rotate"]),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed_rows.csv");
        log.write_csv(&path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &record(&["ID", "Title", "URL"])
        );

        let rows: Vec<StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], record(&["7", "Two Sum", "/problems/two-sum/"]));
        // Realigned by name: no ID or URL column in the second row.
        assert_eq!(rows[1], record(&["", "Rotate Array", ""]));
    }

    #[test]
    fn empty_log_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed_rows.csv");
        FailureLog::new().write_csv(&path).unwrap();
        assert!(!path.exists());
    }
}
