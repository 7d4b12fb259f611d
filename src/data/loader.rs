use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use encoding_rs::WINDOWS_1252;

use super::model::{
    CellValue, LoadReport, Record, ZooDataset, COL_COMMON_NAME, COL_FEMALE_MLE, COL_MALE_MLE,
    COL_OVERALL_MLE, COL_TAXON_CLASS, REQUIRED_COLUMNS,
};

/// Cells that read as "missing", matching the NA markers spreadsheet and
/// dataframe exports commonly emit.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>",
    "#N/A", "#N/A N/A", "#NA", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset once per process. Later calls return the first result
/// and ignore `path`; there is no invalidation short of a restart.
pub fn cached_dataset(path: &Path) -> Result<&'static ZooDataset> {
    static DATASET: OnceLock<ZooDataset> = OnceLock::new();

    if let Some(ds) = DATASET.get() {
        return Ok(ds);
    }
    let dataset = load_csv(path)?;
    Ok(DATASET.get_or_init(|| dataset))
}

/// Read and parse a latin-1 encoded CSV file.
pub fn load_csv(path: &Path) -> Result<ZooDataset> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let dataset = parse_csv_bytes(&bytes).with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "Loaded {} records from {} ({} malformed lines skipped, {} rows without {COL_OVERALL_MLE})",
        dataset.len(),
        path.display(),
        dataset.report.malformed_rows,
        dataset.report.missing_overall,
    );
    Ok(dataset)
}

/// Parse raw CSV bytes in a legacy single-byte encoding.
///
/// * Header names are trimmed, spaces and hyphens become underscores.
/// * Lines with more fields than the header, or that fail to parse, are
///   skipped. Short lines are padded with missing values.
/// * Rows without a numeric `Overall_MLE` are dropped.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<ZooDataset> {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(normalize_header)
        .collect();
    let index = ColumnIndex::locate(&columns)?;
    let width = columns.len();

    let mut report = LoadReport::default();
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("skipping CSV row {row_no}: {e}");
                report.malformed_rows += 1;
                continue;
            }
        };
        if record.len() > width {
            log::debug!(
                "skipping CSV row {row_no}: expected {width} fields, saw {}",
                record.len()
            );
            report.malformed_rows += 1;
            continue;
        }

        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|field| (!is_missing(field)).then(|| field.to_string()))
            .collect();
        row.resize(width, None);
        rows.push(row);
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| ColumnKind::infer(rows.iter().filter_map(|row| row[col].as_deref())))
        .collect();

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(overall_mle) = parse_number(row[index.overall].as_deref()) else {
            report.missing_overall += 1;
            continue;
        };

        let cells = row
            .iter()
            .zip(&kinds)
            .map(|(cell, kind)| kind.convert(cell.as_deref()))
            .collect();

        records.push(Record {
            taxon_class: row[index.taxon_class].clone(),
            common_name: row[index.common_name].clone(),
            overall_mle,
            male_mle: parse_number(row[index.male].as_deref()),
            female_mle: parse_number(row[index.female].as_deref()),
            cells,
        });
    }

    Ok(ZooDataset::new(columns, records, report))
}

/// Trim a header and replace spaces and hyphens with underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().replace([' ', '-'], "_")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Positions of the analysed columns in the normalized header.
struct ColumnIndex {
    taxon_class: usize,
    common_name: usize,
    overall: usize,
    male: usize,
    female: usize,
}

impl ColumnIndex {
    fn locate(columns: &[String]) -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !columns.iter().any(|c| c == name))
            .collect();
        if !missing.is_empty() {
            bail!("CSV missing required column(s): {}", missing.join(", "));
        }

        let pos = |name: &str| columns.iter().position(|c| c == name).unwrap_or_default();
        Ok(ColumnIndex {
            taxon_class: pos(COL_TAXON_CLASS),
            common_name: pos(COL_COMMON_NAME),
            overall: pos(COL_OVERALL_MLE),
            male: pos(COL_MALE_MLE),
            female: pos(COL_FEMALE_MLE),
        })
    }
}

fn is_missing(field: &str) -> bool {
    MISSING_TOKENS.contains(&field)
}

fn parse_number(cell: Option<&str>) -> Option<f64> {
    cell?.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Type shared by every non-missing cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    /// Narrowest kind that accepts every present cell. An all-missing column
    /// is treated as float.
    fn infer<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> Self {
        if cells.clone().all(|c| c.trim().parse::<i64>().is_ok()) {
            if cells.clone().next().is_none() {
                return ColumnKind::Float;
            }
            ColumnKind::Integer
        } else if cells.clone().all(|c| c.trim().parse::<f64>().is_ok()) {
            ColumnKind::Float
        } else if cells.clone().all(|c| parse_bool(c).is_some()) {
            ColumnKind::Bool
        } else {
            ColumnKind::Text
        }
    }

    fn convert(self, cell: Option<&str>) -> CellValue {
        let Some(cell) = cell else {
            return CellValue::Null;
        };
        match self {
            ColumnKind::Integer => cell
                .trim()
                .parse()
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Null),
            ColumnKind::Float => parse_number(Some(cell))
                .map(CellValue::Float)
                .unwrap_or(CellValue::Null),
            ColumnKind::Bool => parse_bool(cell)
                .map(CellValue::Bool)
                .unwrap_or(CellValue::Null),
            ColumnKind::Text => CellValue::String(cell.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str =
        " Species Common Name ,TaxonClass,Overall MLE,Overall CI - lower,Male MLE,Female MLE\n";

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header(" Overall CI - lower "), "Overall_CI___lower");
        assert_eq!(normalize_header("Species Common Name"), "Species_Common_Name");
        assert_eq!(normalize_header("TaxonClass"), "TaxonClass");
    }

    #[test]
    fn parses_rows_in_file_order() {
        let csv = format!(
            "{HEADER}Lion,Mammalia,14.7,12.1,15.0,16.8\nFlamingo,Aves,32.0,28.3,,\n"
        );
        let ds = parse_csv_bytes(csv.as_bytes()).unwrap();

        assert_eq!(
            ds.columns,
            vec![
                "Species_Common_Name",
                "TaxonClass",
                "Overall_MLE",
                "Overall_CI___lower",
                "Male_MLE",
                "Female_MLE"
            ]
        );
        assert_eq!(ds.len(), 2);
        let lion = &ds.records[0];
        assert_eq!(lion.common_name.as_deref(), Some("Lion"));
        assert_eq!(lion.taxon_class.as_deref(), Some("Mammalia"));
        assert_eq!(lion.overall_mle, 14.7);
        assert_eq!(lion.sex_pair(), Some((15.0, 16.8)));
        assert_eq!(lion.cells[3], CellValue::Float(12.1));

        let flamingo = &ds.records[1];
        assert_eq!(flamingo.male_mle, None);
        assert_eq!(flamingo.female_mle, None);
        assert_eq!(flamingo.cells[4], CellValue::Null);
        assert_eq!(ds.taxon_classes, vec!["Mammalia", "Aves"]);
    }

    #[test]
    fn decodes_latin1_names() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"\xd1and\xfa,Mammalia,20.1,18.0,19.0,21.0\n");
        let ds = parse_csv_bytes(&bytes).unwrap();
        assert_eq!(ds.records[0].common_name.as_deref(), Some("Ñandú"));
    }

    #[test]
    fn drops_rows_without_overall_mle() {
        let csv = format!(
            "{HEADER}Lion,Mammalia,14.7,,,\nGhost,Mammalia,,,,\nMyth,Aves,NaN,,,\nOwl,Aves,n/a,,,\n"
        );
        let ds = parse_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.report.missing_overall, 3);
        assert!(ds.records.iter().all(|r| !r.overall_mle.is_nan()));
    }

    #[test]
    fn skips_overlong_lines_and_pads_short_ones() {
        let csv = format!(
            "{HEADER}Lion,Mammalia,14.7,12.1,15.0,16.8,extra\nKea,Aves,15.2\nEmu,Aves,10.0,9.0,9.5,10.5\n"
        );
        let ds = parse_csv_bytes(csv.as_bytes()).unwrap();

        let names: Vec<_> = ds.records.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["Kea", "Emu"]);
        assert_eq!(ds.report.malformed_rows, 1);
        assert_eq!(ds.records[0].cells.len(), ds.columns.len());
        assert_eq!(ds.records[0].male_mle, None);
    }

    #[test]
    fn types_columns_as_a_whole() {
        let csv = "Species Common Name,TaxonClass,Overall MLE,Male MLE,Female MLE,Sample Size,Code\n\
                   Lion,Mammalia,14.7,,,120,1080\n\
                   Kea,Aves,15,,,,A12\n";
        let ds = parse_csv_bytes(csv.as_bytes()).unwrap();

        assert_eq!(ds.records[1].cells[2], CellValue::Float(15.0));
        assert_eq!(ds.records[0].cells[5], CellValue::Integer(120));
        assert_eq!(ds.records[1].cells[5], CellValue::Null);
        assert_eq!(ds.records[0].cells[6], CellValue::String("1080".into()));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "Species Common Name,TaxonClass,Overall MLE\nLion,Mammalia,14.7\n";
        let err = parse_csv_bytes(csv.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Male_MLE"), "{msg}");
        assert!(msg.contains("Female_MLE"), "{msg}");
    }

    #[test]
    fn load_csv_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}Lion,Mammalia,14.7,12.1,15.0,16.8").unwrap();

        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn load_csv_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_csv(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn cached_dataset_loads_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}Lion,Mammalia,14.7,12.1,15.0,16.8").unwrap();

        let first = cached_dataset(file.path()).unwrap();
        let second = cached_dataset(Path::new("does-not-exist.csv")).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.len(), 1);
    }
}
