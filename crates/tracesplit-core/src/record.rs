//! Classified trace records.

use crate::normalize::normalize_line;

/// Token count of a well-formed trace record.
pub const GOOD_ARITY: usize = 24;

/// A record with exactly [`GOOD_ARITY`] tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoodRecord {
    fields: Vec<String>,
}

/// A non-empty record with any token count other than [`GOOD_ARITY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefectRecord {
    fields: Vec<String>,
}

/// Outcome of classifying one normalised line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Good(GoodRecord),
    Defect(DefectRecord),
}

impl GoodRecord {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at `idx`. Always present for `idx < GOOD_ARITY`.
    pub fn field(&self, idx: usize) -> &str {
        &self.fields[idx]
    }
}

impl DefectRecord {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// Number of tokens. Never zero and never [`GOOD_ARITY`].
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl Record {
    /// Classify a normalised token list by arity.
    ///
    /// Returns `None` for an empty list; such lines contribute nothing.
    pub fn classify(tokens: Vec<String>) -> Option<Self> {
        match tokens.len() {
            0 => None,
            GOOD_ARITY => Some(Self::Good(GoodRecord { fields: tokens })),
            _ => Some(Self::Defect(DefectRecord { fields: tokens })),
        }
    }

    /// Normalise and classify one raw line.
    pub fn from_line(line: &str) -> Option<Self> {
        Self::classify(normalize_line(line))
    }

    pub fn fields(&self) -> &[String] {
        match self {
            Self::Good(r) => r.fields(),
            Self::Defect(r) => r.fields(),
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Self::Good(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with(n: usize) -> String {
        (0..n).map(|i| format!("f{i}")).collect::<Vec<_>>().join(";")
    }

    #[test]
    fn twenty_four_fields_is_good() {
        let line = "*001;02-01;A;B;C;D;E;F;G;H;I;J;K;L;M;N;O;P;Q;R;S;T;XYZ123456;ABC";
        let record = Record::from_line(line).unwrap();
        assert!(record.is_good());
        assert_eq!(record.fields()[0], "001");
        assert_eq!(record.fields()[1], "0201");
        assert_eq!(record.fields()[22], "XYZ123456");
    }

    #[test]
    fn any_other_arity_is_defect() {
        for n in [1, 20, 23, 25, 30] {
            let record = Record::from_line(&line_with(n)).unwrap();
            assert!(!record.is_good(), "{n} fields classified good");
            assert_eq!(record.fields().len(), n);
        }
    }

    #[test]
    fn empty_tokens_are_not_classified() {
        assert_eq!(Record::classify(Vec::new()), None);
        assert_eq!(Record::from_line(";;--;**"), None);
    }

    #[test]
    fn extra_separator_with_content_reclassifies() {
        let good = line_with(24);
        assert!(Record::from_line(&good).unwrap().is_good());

        // An empty trailing field is dropped, so arity is unchanged.
        assert!(Record::from_line(&format!("{good};")).unwrap().is_good());

        // A real extra field is not.
        assert!(!Record::from_line(&format!("{good};x")).unwrap().is_good());
    }

    #[test]
    fn defect_field_access_is_bounded() {
        let Record::Defect(d) = Record::from_line("a;b;c").unwrap() else {
            panic!("expected defect");
        };
        assert_eq!(d.field_count(), 3);
        assert_eq!(d.field(2), Some("c"));
        assert_eq!(d.field(23), None);
    }
}
