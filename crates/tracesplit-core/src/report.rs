//! Report projection: fixed 7-column rows for the PDF/CSV exports.
//!
//! Good records are always reported. Defect records are reported only when
//! their field 23 looks like a banknote serial (9 alphanumeric characters).

use std::fmt;

use serde::Serialize;

use crate::record::{DefectRecord, GoodRecord};

/// Column titles of every report, in order.
pub const REPORT_HEADER: [&str; 7] = [
    "Jumlah",
    "No",
    "TGL",
    "STATUS 1",
    "STATUS 2",
    "NOMOR SERI BANKNOTE",
    "DATA ID",
];

/// Source field indices for good-report columns 2..=7.
pub const GOOD_COLUMNS: [usize; 6] = [0, 3, 18, 20, 22, 23];

/// Source field indices for defect-report columns 2..=7.
pub const DEFECT_COLUMNS: [usize; 6] = [0, 3, 18, 20, 23, 24];

/// Field a defect record must carry for it to be reported.
pub const SERIAL_FIELD: usize = 23;

/// Character count of a banknote serial.
pub const SERIAL_LEN: usize = 9;

/// Which record set a report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Good,
    Defect,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Defect => "defect",
        }
    }

    /// Title printed at the top of the PDF.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Good => "Good Data Report",
            Self::Defect => "Defect Data Report",
        }
    }

    /// File name stem of the exported report (without extension).
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Good => "good_data_output",
            Self::Defect => "defect_data_output",
        }
    }

    /// File name of the raw classified dump.
    pub fn dump_file_name(&self) -> &'static str {
        match self {
            Self::Good => "good_output.csv",
            Self::Defect => "defect_output.csv",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One report line. `seq` is 1-based and counts reported rows only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub seq: usize,
    pub no: String,
    pub tgl: String,
    pub status_1: String,
    pub status_2: String,
    pub serial: String,
    pub data_id: String,
}

impl ReportRow {
    fn from_fields(seq: usize, fields: [&str; 6]) -> Self {
        let [no, tgl, status_1, status_2, serial, data_id] = fields.map(str::to_string);
        Self {
            seq,
            no,
            tgl,
            status_1,
            status_2,
            serial,
            data_id,
        }
    }

    /// The row as seven cell strings, matching [`REPORT_HEADER`].
    pub fn cells(&self) -> [String; 7] {
        [
            self.seq.to_string(),
            self.no.clone(),
            self.tgl.clone(),
            self.status_1.clone(),
            self.status_2.clone(),
            self.serial.clone(),
            self.data_id.clone(),
        ]
    }
}

/// Project every good record, numbered from 1.
pub fn good_report(records: &[GoodRecord]) -> Vec<ReportRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| ReportRow::from_fields(i + 1, GOOD_COLUMNS.map(|c| r.field(c))))
        .collect()
}

/// Whether a defect record belongs in the defect report.
///
/// Depends only on the record length and field 23: the record must have more
/// than 23 fields and field 23 must be exactly 9 alphanumeric characters.
pub fn qualifies(record: &DefectRecord) -> bool {
    record.field_count() > SERIAL_FIELD
        && record.field(SERIAL_FIELD).is_some_and(|serial| {
            serial.chars().count() == SERIAL_LEN && serial.chars().all(char::is_alphanumeric)
        })
}

/// Project qualifying defect records, numbered from 1 among qualifying rows.
pub fn defect_report(records: &[DefectRecord]) -> Vec<ReportRow> {
    records
        .iter()
        .filter(|r| qualifies(r))
        .filter_map(|r| {
            // A qualifying defect has at least 25 fields (24 would be good),
            // so every projected index exists.
            let mut fields = [""; 6];
            for (slot, &col) in fields.iter_mut().zip(DEFECT_COLUMNS.iter()) {
                *slot = r.field(col)?;
            }
            Some(fields)
        })
        .enumerate()
        .map(|(i, fields)| ReportRow::from_fields(i + 1, fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn fields(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("v{i}")).collect()
    }

    fn good(f: Vec<String>) -> GoodRecord {
        match Record::classify(f) {
            Some(Record::Good(g)) => g,
            other => panic!("expected good, got {other:?}"),
        }
    }

    fn defect(f: Vec<String>) -> DefectRecord {
        match Record::classify(f) {
            Some(Record::Defect(d)) => d,
            other => panic!("expected defect, got {other:?}"),
        }
    }

    fn defect_with_serial(n: usize, serial: &str) -> DefectRecord {
        let mut f = fields(n);
        f[SERIAL_FIELD] = serial.to_string();
        defect(f)
    }

    #[test]
    fn good_projection_uses_fixed_columns() {
        let rows = good_report(&[good(fields(24))]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.seq, 1);
        assert_eq!(row.no, "v0");
        assert_eq!(row.tgl, "v3");
        assert_eq!(row.status_1, "v18");
        assert_eq!(row.status_2, "v20");
        assert_eq!(row.serial, "v22");
        assert_eq!(row.data_id, "v23");
    }

    #[test]
    fn good_projection_is_total_and_numbered() {
        let records: Vec<_> = (0..5).map(|_| good(fields(24))).collect();
        let rows = good_report(&records);
        assert_eq!(rows.len(), records.len());
        let seqs: Vec<_> = rows.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn defect_projection_uses_fixed_columns() {
        let rows = defect_report(&[defect_with_serial(25, "ABC123456")]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.no, "v0");
        assert_eq!(row.tgl, "v3");
        assert_eq!(row.status_1, "v18");
        assert_eq!(row.status_2, "v20");
        assert_eq!(row.serial, "ABC123456");
        assert_eq!(row.data_id, "v24");
    }

    #[test]
    fn qualification_rules() {
        assert!(qualifies(&defect_with_serial(25, "ABC123456")));
        assert!(qualifies(&defect_with_serial(30, "123456789")));
        assert!(!qualifies(&defect_with_serial(25, "ABC12345")));
        assert!(!qualifies(&defect_with_serial(25, "ABC1234567")));
        assert!(!qualifies(&defect_with_serial(25, "ABC 23456")));
        assert!(!qualifies(&defect_with_serial(25, "ABC12345.")));
        assert!(!qualifies(&defect(fields(20))));
        assert!(!qualifies(&defect(fields(23))));
    }

    #[test]
    fn serial_length_counts_characters() {
        assert!(qualifies(&defect_with_serial(25, "ÄBC123456")));
    }

    #[test]
    fn qualification_ignores_other_fields() {
        let base = defect_with_serial(26, "ZZZ999999");
        assert!(qualifies(&base));

        for idx in [0, 3, 18, 20, 22, 24, 25] {
            let mut f = base.fields().to_vec();
            f[idx] = "changed value!".to_string();
            assert!(qualifies(&defect(f)), "changing field {idx} flipped qualification");
        }
    }

    #[test]
    fn defect_numbering_counts_qualifying_rows_only() {
        let records = vec![
            defect(fields(10)),
            defect_with_serial(25, "AAA111111"),
            defect_with_serial(25, "short"),
            defect(fields(3)),
            defect_with_serial(25, "BBB222222"),
        ];
        let rows = defect_report(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].seq, rows[0].serial.as_str()), (1, "AAA111111"));
        assert_eq!((rows[1].seq, rows[1].serial.as_str()), (2, "BBB222222"));
    }

    #[test]
    fn no_qualifying_defects_yields_no_rows() {
        let records = vec![defect(fields(20)), defect_with_serial(25, "bad")];
        assert!(defect_report(&records).is_empty());
    }

    #[test]
    fn cells_follow_header_order() {
        let row = good_report(&[good(fields(24))]).remove(0);
        let cells = row.cells();
        assert_eq!(cells.len(), REPORT_HEADER.len());
        assert_eq!(cells[0], "1");
        assert_eq!(cells[5], "v22");
    }

    #[test]
    fn kind_names() {
        assert_eq!(ReportKind::Good.file_stem(), "good_data_output");
        assert_eq!(ReportKind::Defect.dump_file_name(), "defect_output.csv");
        assert_eq!(ReportKind::Defect.to_string(), "defect");
        assert_eq!(
            serde_json::to_string(&ReportKind::Good).unwrap(),
            "\"good\""
        );
    }
}
