use std::path::Path;

use thiserror::Error;

use super::model::ZooDataset;

/// Why an export did not complete.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode CSV for {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Write the header and the selected rows to `path` as UTF-8 CSV, replacing
/// any existing file. No index column is written. Returns the number of rows.
pub fn write_filtered_csv(
    path: &Path,
    dataset: &ZooDataset,
    indices: &[usize],
) -> Result<usize, ExportError> {
    let display = path.display().to_string();
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: display.clone(),
        source,
    };

    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: display.clone(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(&dataset.columns).map_err(csv_err)?;
    for &i in indices {
        let row = dataset.records[i].cells.iter().map(|c| c.to_csv_field());
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: display.clone(),
        source,
    })?;

    log::info!("Exported {} rows to {display}", indices.len());
    Ok(indices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterState, filtered_indices};
    use crate::data::loader::{load_csv, parse_csv_bytes};

    const SOURCE: &str = "Species Common Name,TaxonClass,Overall MLE,Male MLE,Female MLE,Sample Size\n\
                          Lion,Mammalia,14.7,15.0,16.8,120\n\
                          Flamingo,Aves,32.0,,,45\n\
                          \"Owl, Snowy\",Aves,11.5,10.2,12.9,\n";

    #[test]
    fn export_then_reload_yields_same_rows() {
        let ds = parse_csv_bytes(SOURCE.as_bytes()).unwrap();
        let filters = FilterState {
            taxon_class: Some("Aves".into()),
            ..Default::default()
        };
        let indices = filtered_indices(&ds, &filters);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_aza_mle.csv");
        let written = write_filtered_csv(&path, &ds, &indices).unwrap();
        assert_eq!(written, 2);

        let reloaded = load_csv(&path).unwrap();
        assert_eq!(reloaded.columns, ds.columns);
        let expected: Vec<_> = indices.iter().map(|&i| ds.records[i].clone()).collect();
        assert_eq!(reloaded.records, expected);
    }

    #[test]
    fn export_overwrites_existing_file() {
        let ds = parse_csv_bytes(SOURCE.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are longer than the export\n".repeat(20)).unwrap();

        write_filtered_csv(&path, &ds, &[0]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Species_Common_Name,TaxonClass,Overall_MLE,Male_MLE,Female_MLE,Sample_Size\n\
             Lion,Mammalia,14.7,15.0,16.8,120\n"
        );
    }

    #[test]
    fn empty_selection_writes_header_only() {
        let ds = parse_csv_bytes(SOURCE.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        assert_eq!(write_filtered_csv(&path, &ds, &[]).unwrap(), 0);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let ds = parse_csv_bytes(SOURCE.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");

        let err = write_filtered_csv(&path, &ds, &[0]).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }), "{err}");
    }
}
