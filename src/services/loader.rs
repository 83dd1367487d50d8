//! Transaction export loader
//!
//! Parses a CSV export into typed transactions. Columns are located by
//! header name, so column order does not matter and extra columns are
//! ignored. A missing column or a bad date fails the whole load; a bad
//! amount only produces a warning and leaves the amount missing.

use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::Serialize;

use super::filter::{earliest_date, latest_date};
use crate::error::{SankeyError, SankeyResult};
use crate::models::{Money, Transaction};

/// Columns every export must provide
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date", "name", "amount", "type", "category", "account", "excluded",
];

/// What went wrong with a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    /// The value could not be read; amounts become missing, flags false
    Unreadable,
    /// Digits past the cents were rounded away
    Rounded,
}

/// A non-fatal problem with a single cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// Line number in the source file (header is line 1)
    pub row: usize,
    /// Column the value came from
    pub column: &'static str,
    /// The raw cell value
    pub value: String,
    pub kind: WarningKind,
}

impl ParseWarning {
    fn unreadable(row: usize, column: &'static str, value: &str) -> Self {
        Self {
            row,
            column,
            value: value.to_string(),
            kind: WarningKind::Unreadable,
        }
    }

    fn rounded(row: usize, column: &'static str, value: &str) -> Self {
        Self {
            row,
            column,
            value: value.to_string(),
            kind: WarningKind::Rounded,
        }
    }

    pub fn is_unreadable(&self) -> bool {
        self.kind == WarningKind::Unreadable
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::Unreadable => write!(
                f,
                "row {}: could not read {} '{}', treating as missing",
                self.row, self.column, self.value
            ),
            WarningKind::Rounded => write!(
                f,
                "row {}: {} '{}' has more than two decimals, rounded to cents",
                self.row, self.column, self.value
            ),
        }
    }
}

/// Result of a successful load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedData {
    /// Transactions in file order
    pub transactions: Vec<Transaction>,
    /// Cells that could not be coerced
    pub warnings: Vec<ParseWarning>,
}

impl LoadedData {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Earliest transaction date, if any
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        earliest_date(&self.transactions)
    }

    /// Latest transaction date, if any
    pub fn latest_date(&self) -> Option<NaiveDate> {
        latest_date(&self.transactions)
    }
}

/// Header positions of the required columns
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    name: usize,
    amount: usize,
    kind: usize,
    category: usize,
    account: usize,
    excluded: usize,
}

impl ColumnIndex {
    /// Locate the required columns, reporting every one that is absent
    fn from_headers(headers: &StringRecord) -> SankeyResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |name: &str| normalized.iter().position(|h| h == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| find(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SankeyError::missing_columns(missing));
        }

        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            date: at("date"),
            name: at("name"),
            amount: at("amount"),
            kind: at("type"),
            category: at("category"),
            account: at("account"),
            excluded: at("excluded"),
        })
    }
}

/// Loads transaction exports
#[derive(Debug, Clone)]
pub struct Loader {
    /// Primary date format (strftime)
    date_format: String,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Loader {
    /// Create a loader expecting `YYYY-MM-DD` dates
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Load from an in-memory string
    pub fn load_str(&self, content: &str) -> SankeyResult<LoadedData> {
        self.load_from_reader(content.as_bytes())
    }

    /// Load from raw bytes, as supplied by an upload
    pub fn load_bytes(&self, bytes: &[u8]) -> SankeyResult<LoadedData> {
        self.load_from_reader(bytes)
    }

    /// Load from a file on disk
    pub fn load_path(&self, path: &Path) -> SankeyResult<LoadedData> {
        let file = std::fs::File::open(path).map_err(|e| {
            SankeyError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.load_from_reader(file)
    }

    /// Parse a CSV stream into transactions
    pub fn load_from_reader<R: Read>(&self, input: R) -> SankeyResult<LoadedData> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut data = LoadedData::default();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            let txn = self.parse_record(&record, row, &columns, &mut data.warnings)?;
            data.transactions.push(txn);
        }

        for warning in &data.warnings {
            warn!("{}", warning);
        }
        match (data.earliest_date(), data.latest_date()) {
            (Some(first), Some(last)) => info!(
                "Loaded {} transactions from {} to {} ({} warnings)",
                data.transactions.len(),
                first,
                last,
                data.warnings.len()
            ),
            _ => info!("Loaded an empty export ({} warnings)", data.warnings.len()),
        }

        Ok(data)
    }

    /// Parse a single CSV record
    fn parse_record(
        &self,
        record: &StringRecord,
        row: usize,
        columns: &ColumnIndex,
        warnings: &mut Vec<ParseWarning>,
    ) -> SankeyResult<Transaction> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let date_str = cell(columns.date);
        let date = self
            .parse_date(date_str)
            .ok_or_else(|| SankeyError::DateParse {
                row,
                value: date_str.to_string(),
            })?;

        let amount_str = cell(columns.amount);
        let amount = match parse_amount(amount_str) {
            Some((amount, rounded)) => {
                if rounded {
                    warnings.push(ParseWarning::rounded(row, "amount", amount_str));
                }
                Some(amount)
            }
            None => {
                warnings.push(ParseWarning::unreadable(row, "amount", amount_str));
                None
            }
        };

        let excluded_str = cell(columns.excluded);
        let excluded = parse_flag(excluded_str).unwrap_or_else(|| {
            warnings.push(ParseWarning::unreadable(row, "excluded", excluded_str));
            false
        });

        let category = cell(columns.category);

        Ok(Transaction {
            date,
            name: cell(columns.name).to_string(),
            amount,
            kind: cell(columns.kind).to_string(),
            category: (!category.is_empty()).then(|| category.to_string()),
            account: cell(columns.account).to_string(),
            excluded,
        })
    }

    /// Parse a date string, falling back to common export formats.
    /// Date-time values are truncated to their date.
    fn parse_date(&self, s: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(s, &self.date_format) {
            return Some(date);
        }

        let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
        for format in date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Some(date);
            }
        }

        let datetime_formats = [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M:%S%.f",
        ];
        for format in datetime_formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(dt.date());
            }
        }

        chrono::DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

/// Coerce an amount cell; `None` when it is blank, not a number or out of
/// range. The flag is set when sub-cent digits were rounded away.
/// Accounting-style parentheses mark a negative value.
fn parse_amount(s: &str) -> Option<(Money, bool)> {
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        return Money::parse_rounded(inner)
            .ok()
            .map(|(m, rounded)| (-m.abs(), rounded));
    }
    Money::parse_rounded(s).ok()
}

/// Parse a boolean flag cell; blank means false
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" | "f" => Some(false),
        "true" | "yes" | "y" | "1" | "t" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "date,name,amount,status,category,type,account,excluded";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_sample_export() {
        let csv_data = format!(
            "{}\n{}\n{}",
            HEADER,
            "2026-01-01,Salary,-5000.00,cleared,Salary,income,Checking,false",
            "2026-01-02,Grocery Store,85.50,cleared,Food & Dining,regular,Credit Card,false"
        );

        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.len(), 2);
        assert!(data.warnings.is_empty());

        let salary = &data.transactions[0];
        assert_eq!(salary.date, date(2026, 1, 1));
        assert_eq!(salary.amount, Some(Money::from_cents(-500000)));
        assert!(salary.is_income());
        assert_eq!(salary.account, "Checking");

        let grocery = &data.transactions[1];
        assert_eq!(grocery.name, "Grocery Store");
        assert_eq!(grocery.category.as_deref(), Some("Food & Dining"));
        assert_eq!(grocery.kind, "regular");
        assert!(!grocery.excluded);
    }

    #[test]
    fn test_missing_columns_are_all_named() {
        let csv_data = "date,name,type,category,account\n2026-01-01,Salary,income,Salary,Checking";
        let err = Loader::new().load_str(csv_data).unwrap_err();
        match err {
            SankeyError::Schema { missing } => assert_eq!(missing, vec!["amount", "excluded"]),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_schema_error() {
        let err = Loader::new().load_str("").unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let csv_data = "\u{feff}Date,Name,Amount,Type,Category,Account,Excluded\n2026-01-05,Cafe,4.50,regular,Coffee,Card,FALSE";
        let data = Loader::new().load_str(csv_data).unwrap();
        assert_eq!(data.transactions[0].amount, Some(Money::from_cents(450)));
    }

    #[test]
    fn test_bad_amount_is_warning_not_error() {
        let csv_data = format!(
            "{}\n{}\n{}",
            HEADER,
            "2026-01-02,Grocery Store,abc,cleared,Food,regular,Card,false",
            "2026-01-03,Bakery,12.00,cleared,Food,regular,Card,false"
        );

        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.transactions[0].amount, None);
        assert_eq!(data.transactions[1].amount, Some(Money::from_cents(1200)));
        assert_eq!(
            data.warnings,
            vec![ParseWarning {
                row: 2,
                column: "amount",
                value: "abc".into(),
                kind: WarningKind::Unreadable,
            }]
        );
    }

    #[test]
    fn test_sub_cent_amount_is_rounded_with_warning() {
        let csv_data = format!(
            "{}\n{}\n{}",
            HEADER,
            "2026-01-02,Interest,0.004,cleared,Fees,regular,Card,false",
            "2026-01-03,Bakery,12.500,cleared,Food,regular,Card,false"
        );

        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.transactions[0].amount, Some(Money::zero()));
        assert_eq!(data.transactions[1].amount, Some(Money::from_cents(1250)));
        assert_eq!(data.warnings.len(), 1);
        assert_eq!(data.warnings[0].kind, WarningKind::Rounded);
        assert!(!data.warnings[0].is_unreadable());
        assert!(data.warnings[0].to_string().contains("rounded to cents"));
    }

    #[test]
    fn test_out_of_range_amount_is_missing() {
        let csv_data = format!(
            "{}\n{}",
            HEADER, "2026-01-02,A,90000000000000000,cleared,Food,regular,Card,false"
        );

        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.transactions[0].amount, None);
        assert!(data.warnings[0].is_unreadable());
    }

    #[test]
    fn test_blank_amount_is_missing() {
        let csv_data = format!("{}\n{}", HEADER, "2026-01-02,Pending,,pending,Food,regular,Card,");
        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.transactions[0].amount, None);
        assert_eq!(data.warnings.len(), 1);
    }

    #[test]
    fn test_bad_date_fails_whole_load() {
        let csv_data = format!(
            "{}\n{}\n{}",
            HEADER,
            "2026-01-02,Grocery Store,10.00,cleared,Food,regular,Card,false",
            "not-a-date,Bakery,12.00,cleared,Food,regular,Card,false"
        );

        let err = Loader::new().load_str(&csv_data).unwrap_err();
        match err {
            SankeyError::DateParse { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected date error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_calendar_date_fails() {
        let csv_data = format!("{}\n{}", HEADER, "2026-02-30,Rent,1500,cleared,Housing,regular,Checking,false");
        assert!(matches!(
            Loader::new().load_str(&csv_data),
            Err(SankeyError::DateParse { .. })
        ));
    }

    #[test]
    fn test_datetime_values_truncate_to_date() {
        let csv_data = format!(
            "{}\n{}\n{}",
            HEADER,
            "2026-01-02 14:30:00,Cafe,4.00,cleared,Coffee,regular,Card,false",
            "2026-01-03T08:00:00,Cafe,4.00,cleared,Coffee,regular,Card,false"
        );
        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.transactions[0].date, date(2026, 1, 2));
        assert_eq!(data.transactions[1].date, date(2026, 1, 3));
    }

    #[test]
    fn test_empty_category_is_none() {
        let csv_data = format!("{}\n{}", HEADER, "2026-01-02,Transfer,100.00,cleared,,regular,Checking,false");
        let data = Loader::new().load_str(&csv_data).unwrap();
        assert!(data.transactions[0].category.is_none());
    }

    #[test]
    fn test_excluded_flag_values() {
        let csv_data = format!(
            "{}\n{}\n{}\n{}",
            HEADER,
            "2026-01-02,A,1.00,cleared,Food,regular,Card,True",
            "2026-01-02,B,1.00,cleared,Food,regular,Card,0",
            "2026-01-02,C,1.00,cleared,Food,regular,Card,maybe"
        );
        let data = Loader::new().load_str(&csv_data).unwrap();
        assert!(data.transactions[0].excluded);
        assert!(!data.transactions[1].excluded);
        assert!(!data.transactions[2].excluded);
        assert_eq!(data.warnings.len(), 1);
        assert_eq!(data.warnings[0].column, "excluded");
    }

    #[test]
    fn test_accounting_negative_amount() {
        assert_eq!(parse_amount("(30.00)").map(|(m, _)| m), Some(Money::from_cents(-3000)));
        assert_eq!(parse_amount("$1,200.10").map(|(m, _)| m), Some(Money::from_cents(120010)));
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let csv_data = format!(
            "{}\n{}",
            HEADER,
            "2026-01-02,\"Smith, Jones & Co\",\"1,250.00\",cleared,Legal,regular,Checking,false"
        );
        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.transactions[0].name, "Smith, Jones & Co");
        assert_eq!(data.transactions[0].amount, Some(Money::from_cents(125000)));
    }

    #[test]
    fn test_earliest_and_latest_dates() {
        let csv_data = format!(
            "{}\n{}\n{}",
            HEADER,
            "2026-03-02,A,1.00,cleared,Food,regular,Card,false",
            "2025-12-31,B,1.00,cleared,Food,regular,Card,false"
        );
        let data = Loader::new().load_str(&csv_data).unwrap();
        assert_eq!(data.earliest_date(), Some(date(2025, 12, 31)));
        assert_eq!(data.latest_date(), Some(date(2026, 3, 2)));
        assert_eq!(LoadedData::default().earliest_date(), None);
    }

    #[test]
    fn test_load_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "2026-01-02,Cafe,4.00,cleared,Coffee,regular,Card,false").unwrap();

        let data = Loader::new().load_path(file.path()).unwrap();
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Loader::new()
            .load_path(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, SankeyError::Io(_)));
    }
}
