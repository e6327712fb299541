//! Table search: case-insensitive substring match on the first column.

/// Whether `row`'s first column contains `needle`, ignoring case.
///
/// Rows without a first column never match. An empty needle matches any
/// row that has one.
pub fn matches_first_column<S: AsRef<str>>(row: &[S], needle: &str) -> bool {
    let Some(first) = row.first() else {
        return false;
    };
    first
        .as_ref()
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Keep the rows matching `needle`, preserving order.
pub fn filter_rows<'a, S: AsRef<str>>(rows: &'a [Vec<S>], needle: &str) -> Vec<&'a [S]> {
    rows.iter()
        .map(Vec::as_slice)
        .filter(|row| matches_first_column(*row, needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        [
            vec!["ABC001", "x"],
            vec!["abd002", "ABC"],
            vec!["XYZ003", "abc"],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect()
    }

    #[test]
    fn case_insensitive_first_column() {
        let rows = rows();
        let hits = filter_rows(&rows, "ab");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0][0], "ABC001");
        assert_eq!(hits[1][0], "abd002");
    }

    #[test]
    fn other_columns_are_ignored() {
        let rows = rows();
        let hits = filter_rows(&rows, "abc");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0][0], "ABC001");
    }

    #[test]
    fn empty_needle_keeps_everything() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, "").len(), 3);
    }

    #[test]
    fn empty_row_never_matches() {
        let empty: [&str; 0] = [];
        assert!(!matches_first_column(&empty, ""));
    }
}
