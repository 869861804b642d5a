use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{Dataset, Diagnosis, Measure, TumorRecord, UnknownDiagnosis};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a file into a [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data file is absent. Shown to the user in place of the dashboard.
    #[error("file '{}' not found; place it at {}", file_name(.path), display_location(.path))]
    SourceNotFound { path: PathBuf },

    #[error("reading {origin}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin}: missing column '{column}'")]
    MissingColumn { origin: String, column: &'static str },

    #[error("{origin}: malformed row {row}")]
    Malformed {
        origin: String,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("{origin}: row {row} has unknown diagnosis '{value}'")]
    UnknownDiagnosis {
        origin: String,
        row: usize,
        value: String,
    },

    #[error("{origin}: row {row} has a non-finite '{column}'")]
    NonFiniteValue {
        origin: String,
        row: usize,
        column: &'static str,
    },

    #[error("duplicate id {id}")]
    DuplicateId { id: u64 },
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn display_location(path: &Path) -> String {
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path).display().to_string(),
        _ => path.display().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the tumor table from a delimited text file.  Dispatch by extension.
///
/// * `.tsv` / `.tab` – tab separated
/// * anything else   – comma separated (`.csv`, `.txt`, …)
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let delimiter = match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    };

    let origin = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            origin: origin.clone(),
            source,
        },
    })?;

    load_reader(file, delimiter, &origin)
}

// ---------------------------------------------------------------------------
// Delimited-text parsing
// ---------------------------------------------------------------------------

/// Columns the dashboard needs.  Any other column in the file is ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: u64,
    diagnosis: String,
    radius_mean: f64,
    perimeter_mean: f64,
    area_mean: f64,
    concavity_mean: f64,
    #[serde(rename = "concave points_mean")]
    concave_points_mean: f64,
    symmetry_mean: f64,
}

/// Parse a header-first delimited table into a validated [`Dataset`].
///
/// `origin` names the source in error messages.
pub fn load_reader<R: Read>(reader: R, delimiter: u8, origin: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(|source| LoadError::Malformed {
        origin: origin.to_string(),
        row: 0,
        source,
    })?;
    for column in ["id", "diagnosis"]
        .into_iter()
        .chain(Measure::ALL.iter().map(|m| m.column()))
    {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                origin: origin.to_string(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<RawRecord>().enumerate() {
        // 1-based data row, header excluded.
        let row = i + 1;
        let raw = result.map_err(|source| LoadError::Malformed {
            origin: origin.to_string(),
            row,
            source,
        })?;
        rows.push(validate(raw, row, origin)?);
    }

    let dataset = Dataset::from_records(rows)?;
    log::debug!("parsed {} rows from {origin}", dataset.len());
    Ok(dataset)
}

fn validate(raw: RawRecord, row: usize, origin: &str) -> Result<TumorRecord, LoadError> {
    let diagnosis: Diagnosis = raw.diagnosis.parse().map_err(|UnknownDiagnosis(value)| {
        LoadError::UnknownDiagnosis {
            origin: origin.to_string(),
            row,
            value,
        }
    })?;

    let measures = [
        raw.radius_mean,
        raw.perimeter_mean,
        raw.area_mean,
        raw.concavity_mean,
        raw.concave_points_mean,
        raw.symmetry_mean,
    ];
    if let Some(pos) = measures.iter().position(|v| !v.is_finite()) {
        return Err(LoadError::NonFiniteValue {
            origin: origin.to_string(),
            row,
            column: Measure::ALL[pos].column(),
        });
    }

    Ok(TumorRecord::new(raw.id, diagnosis, measures))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str =
        "id,diagnosis,radius_mean,texture_mean,perimeter_mean,area_mean,concavity_mean,concave points_mean,symmetry_mean,";

    fn parse(body: &str) -> Result<Dataset, LoadError> {
        let text = format!("{HEADER}\n{body}");
        load_reader(text.as_bytes(), b',', "test.csv")
    }

    #[test]
    fn parses_kaggle_layout_and_ignores_extra_columns() {
        let ds = parse(
            "842302,M,17.99,10.38,122.8,1001,0.3001,0.1471,0.2419,\n\
             8510426,B,13.54,14.36,87.46,566.3,0.06664,0.04781,0.1885,\n",
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        let first = ds.rows()[0];
        assert_eq!(first.id, 842302);
        assert_eq!(first.diagnosis, Diagnosis::Malignant);
        assert_eq!(first.value(Measure::Area), 1001.0);
        assert_eq!(first.value(Measure::ConcavePoints), 0.1471);
        assert_eq!(first.value(Measure::Concavity), 0.3001);
        assert_eq!(ds.rows()[1].diagnosis, Diagnosis::Benign);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let text = "id,diagnosis,radius_mean\n1,M,10.0\n";
        let err = load_reader(text.as_bytes(), b',', "short.csv").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "perimeter_mean",
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_measure_is_malformed() {
        let err = parse("1,M,abc,1,1,1,1,1,1,\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { row: 1, .. }));
    }

    #[test]
    fn unknown_diagnosis_is_rejected() {
        let err = parse("1,M,1,1,1,1,1,1,1,\n2,X,1,1,1,1,1,1,1,\n").unwrap_err();
        match err {
            LoadError::UnknownDiagnosis { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "X");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_measure_is_rejected() {
        let err = parse("1,B,1,1,1,NaN,1,1,1,\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::NonFiniteValue {
                column: "area_mean",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let err = parse("5,B,1,1,1,1,1,1,1,\n5,M,2,2,2,2,2,2,2,\n").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { id: 5 }));
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let ds = parse("").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dados.csv");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound { .. }));

        let message = err.to_string();
        assert!(message.contains("dados.csv"), "{message}");
        assert!(
            message.contains(&dir.path().display().to_string()),
            "{message}"
        );
    }

    #[test]
    fn tsv_extension_switches_delimiter() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "{}", HEADER.replace(',', "\t")).unwrap();
        writeln!(file, "9\tB\t12\t0\t80\t450\t0.05\t0.02\t0.18\t").unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows()[0].value(Measure::Area), 450.0);
    }
}
