//! CSV files: raw classified dumps and 7-column reports.
//!
//! Dumps have no header and rows of varying width. Reports start with the
//! [`REPORT_HEADER`] row. Both use CRLF record terminators.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use tracesplit_core::{REPORT_HEADER, ReportRow};
use tracing::info;

use crate::ExportError;

fn writer<W: Write>(out: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(out)
}

/// Write one CSV row per record, fields as-is, no header.
pub fn write_dump<W, R, S>(out: W, rows: R) -> Result<usize, ExportError>
where
    W: Write,
    R: IntoIterator,
    R::Item: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut wtr = writer(out);
    let mut count = 0;
    for row in rows {
        wtr.write_record(row)?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

/// Write a dump to `path`, replacing any existing file.
pub fn write_dump_file<R, S>(path: &Path, rows: R) -> Result<usize, ExportError>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let count = write_dump(File::create(path)?, rows)?;
    info!(path = %path.display(), rows = count, "wrote dump");
    Ok(count)
}

/// Read a dump back as rows of strings.
pub fn read_dump<R: Read>(input: R) -> Result<Vec<Vec<String>>, ExportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Read the dump at `path`.
pub fn read_dump_file(path: &Path) -> Result<Vec<Vec<String>>, ExportError> {
    let file = File::open(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_dump(file)
}

/// Write the header row followed by every report row.
pub fn write_report_csv<W: Write>(out: W, rows: &[ReportRow]) -> Result<(), ExportError> {
    let mut wtr = writer(out);
    wtr.write_record(REPORT_HEADER)?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracesplit_core::{ReportKind, Session};

    fn session() -> Session {
        let good = (0..24).map(|i| format!("g{i}")).collect::<Vec<_>>().join(";");
        let mut defect: Vec<String> = (0..25).map(|i| format!("d{i}")).collect();
        defect[23] = "SER123456".into();
        let text = format!("head\n{good}\na;b,c;\"q\"\n{}\nfoot\n", defect.join(";"));
        Session::from_text(&text)
    }

    #[test]
    fn dump_has_no_header_and_varying_widths() {
        let session = session();
        let mut buf = Vec::new();
        let n = write_dump(&mut buf, session.defect().iter().map(|r| r.fields())).unwrap();
        assert_eq!(n, 2);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.split("\r\n");
        assert_eq!(lines.next(), Some("a,\"b,c\",\"\"\"q\"\"\""));
        assert!(lines.next().unwrap().starts_with("d0,d1,d2,"));
    }

    #[test]
    fn dump_reloads_to_same_rows() {
        let session = session();
        let mut buf = Vec::new();
        write_dump(&mut buf, session.defect().iter().map(|r| r.fields())).unwrap();

        let rows = read_dump(buf.as_slice()).unwrap();
        let expected: Vec<Vec<String>> =
            session.defect().iter().map(|r| r.fields().to_vec()).collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn empty_dump_is_empty_file() {
        let mut buf = Vec::new();
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(write_dump(&mut buf, &rows).unwrap(), 0);
        assert!(buf.is_empty());
        assert!(read_dump(buf.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn report_csv_has_header_then_rows() {
        let session = session();
        let mut buf = Vec::new();
        write_report_csv(&mut buf, &session.report(ReportKind::Defect)).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.split_terminator("\r\n").collect();
        assert_eq!(
            lines[0],
            "Jumlah,No,TGL,STATUS 1,STATUS 2,NOMOR SERI BANKNOTE,DATA ID"
        );
        assert_eq!(lines[1], "1,d0,d3,d18,d20,SER123456,d24");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn header_only_report() {
        let mut buf = Vec::new();
        write_report_csv(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Jumlah,No,TGL,STATUS 1,STATUS 2,NOMOR SERI BANKNOTE,DATA ID\r\n"
        );
    }

    #[test]
    fn missing_dump_is_read_error() {
        let err = read_dump_file(Path::new("/nonexistent/good_output.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Read { .. }));
    }
}
