use std::fmt;

// ---------------------------------------------------------------------------
// Column names (after header normalization)
// ---------------------------------------------------------------------------

pub const COL_TAXON_CLASS: &str = "TaxonClass";
pub const COL_COMMON_NAME: &str = "Species_Common_Name";
pub const COL_OVERALL_MLE: &str = "Overall_MLE";
pub const COL_MALE_MLE: &str = "Male_MLE";
pub const COL_FEMALE_MLE: &str = "Female_MLE";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_TAXON_CLASS,
    COL_COMMON_NAME,
    COL_OVERALL_MLE,
    COL_MALE_MLE,
    COL_FEMALE_MLE,
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Columns are typed as a whole at load time,
/// so every non-null cell of a column shares the same variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Text written to an exported CSV field. Floats keep their decimal point
    /// so the column reads back as float.
    pub fn to_csv_field(&self) -> String {
        match self {
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one species row
// ---------------------------------------------------------------------------

/// A single species row with the analysed fields pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub taxon_class: Option<String>,
    pub common_name: Option<String>,
    /// Median life expectancy over both sexes. Always present.
    pub overall_mle: f64,
    pub male_mle: Option<f64>,
    pub female_mle: Option<f64>,
    /// Every cell in file column order, the typed fields above included.
    pub cells: Vec<CellValue>,
}

impl Record {
    /// Label used on chart axes; rows without a name fall back to a dash.
    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or("–")
    }

    /// Both sex-specific values, when the row carries them.
    pub fn sex_pair(&self) -> Option<(f64, f64)> {
        Some((self.male_mle?, self.female_mle?))
    }
}

// ---------------------------------------------------------------------------
// ZooDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Rows dropped while loading. Kept for logging and the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines the CSV parser rejected or that had more fields than the header.
    pub malformed_rows: usize,
    /// Rows without a usable `Overall_MLE`.
    pub missing_overall: usize,
}

/// The full parsed dataset.
#[derive(Debug, Clone)]
pub struct ZooDataset {
    /// Normalized column names in file order.
    pub columns: Vec<String>,
    /// Rows in file order, minus the dropped ones.
    pub records: Vec<Record>,
    /// Distinct non-missing `TaxonClass` values in order of first appearance.
    pub taxon_classes: Vec<String>,
    pub report: LoadReport,
}

impl ZooDataset {
    /// Build the class index from the loaded records.
    pub fn new(columns: Vec<String>, records: Vec<Record>, report: LoadReport) -> Self {
        let mut taxon_classes: Vec<String> = Vec::new();
        for rec in &records {
            if let Some(class) = &rec.taxon_class {
                if !taxon_classes.contains(class) {
                    taxon_classes.push(class.clone());
                }
            }
        }
        ZooDataset {
            columns,
            records,
            taxon_classes,
            report,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
