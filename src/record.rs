//! Saving and loading the results of an experiment, together with
//! the parameters that produced them, as versioned JSON.
//!
//! A record looks like
//! ```text
//! {
//!     "sequence": [1.0, 1.5, 1.8333334],
//!     "parameters": [0, 3, 4, "kahan"],
//!     "version": 1.1
//! }
//! ```

use std::fmt;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::*;

pub enum RecordError {
    Io(String, String),
    Format(String, String),
    Version(Option<f64>),
    MissingKey(&'static str),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::Io(path, cause) => write!(f, "failed to access '{}': {}", path, cause),
            RecordError::Format(path, cause) => write!(f, "'{}' is not a valid record: {}", path, cause),
            RecordError::Version(Some(v)) => write!(f, "invalid version: expected {}, but got {}", RECORD_VERSION, v),
            RecordError::Version(None) => write!(f, "invalid version: expected {}, but none was given", RECORD_VERSION),
            RecordError::MissingKey(key) => write!(f, "missing '{}' key in the record", key),
        }
    }
}

impl fmt::Debug for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Error for RecordError {}

impl RecordError {
    fn io(path: &Path, cause: impl fmt::Display) -> Self {
        Self::Io(path.display().to_string(), cause.to_string())
    }

    fn format(path: &Path, cause: impl fmt::Display) -> Self {
        Self::Format(path.display().to_string(), cause.to_string())
    }
}

/// Writes `sequence` and `parameters` to `path`, indented by four spaces.
pub fn save<S, P>(path: &Path, sequence: &[S], parameters: &[P]) -> Result<(), RecordError>
where S: Serialize, P: Serialize {
    let mut record = Map::new();
    record.insert("sequence".to_owned(), to_value(path, sequence)?);
    record.insert("parameters".to_owned(), to_value(path, parameters)?);
    record.insert("version".to_owned(), Value::from(RECORD_VERSION));

    let file = File::create(path).map_err(|e| RecordError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    Value::Object(record).serialize(&mut ser).map_err(|e| RecordError::format(path, e))?;
    writer.flush().map_err(|e| RecordError::io(path, e))?;

    tracing::info!(path = %path.display(), elements = sequence.len(), "saved record");
    Ok(())
}

/// The path of the record for one of several named results:
/// `results.json` becomes `results_Leibniz.json`.
pub fn suffixed(path: &Path, name: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{}_{}.json", stem, name))
}

fn to_value<T: Serialize + ?Sized>(path: &Path, v: &T) -> Result<Value, RecordError> {
    serde_json::to_value(v).map_err(|e| RecordError::format(path, e))
}

/// Reads a record written by `save`, returning its sequence elements
/// and parameters.
pub fn load(path: &Path) -> Result<(Vec<Value>, Vec<Value>), RecordError> {
    let file = File::open(path).map_err(|e| RecordError::io(path, e))?;
    let record: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| RecordError::format(path, e))?;

    let version = record.get("version").and_then(Value::as_f64);
    if version != Some(RECORD_VERSION) {
        return Err(RecordError::Version(version));
    }

    let sequence = take_array(path, &record, "sequence")?;
    let parameters = take_array(path, &record, "parameters")?;
    tracing::info!(path = %path.display(), elements = sequence.len(), "loaded record");
    Ok((sequence, parameters))
}

fn take_array(path: &Path, record: &Value, key: &'static str) -> Result<Vec<Value>, RecordError> {
    match record.get(key) {
        None => Err(RecordError::MissingKey(key)),
        Some(Value::Array(v)) => Ok(v.clone()),
        Some(_) => Err(RecordError::format(path, format!("'{}' is not an array", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harmonic.json");

        let sequence = vec![1.0, 1.5, 1.75];
        let parameters = vec![json!(0), json!(3), json!("kahan")];
        save(&path, &sequence, &parameters).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        println!("{}", text);
        assert!(text.contains("\n    \"sequence\": [\n        1.0,"));

        // keys appear in the order they were written
        let order: Vec<usize> = ["\"sequence\"", "\"parameters\"", "\"version\""].iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));

        let (s, p) = load(&path).unwrap();
        assert_eq!(s, vec![json!(1.0), json!(1.5), json!(1.75)]);
        assert_eq!(p, parameters);
    }

    #[test]
    fn suffixed_paths() {
        assert_eq!(suffixed(Path::new("out/results.json"), "Leibniz"), PathBuf::from("out/results_Leibniz.json"));
        assert_eq!(suffixed(Path::new("plot.png"), "Chudnovsky"), PathBuf::from("plot_Chudnovsky.json"));
        assert_eq!(suffixed(Path::new("data"), "MonteCarlo"), PathBuf::from("data_MonteCarlo.json"));
    }

    #[test]
    fn rejects_bad_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");

        let cases = [
            (json!({"sequence": [], "parameters": [], "version": 1.0}), "invalid version: expected 1.1, but got 1"),
            (json!({"sequence": [], "parameters": []}), "invalid version: expected 1.1, but none was given"),
            (json!({"parameters": [], "version": 1.1}), "missing 'sequence' key in the record"),
            (json!({"sequence": [], "version": 1.1}), "missing 'parameters' key in the record"),
        ];

        for (record, msg) in cases.iter() {
            std::fs::write(&path, record.to_string()).unwrap();
            let err = load(&path).unwrap_err();
            println!("{}", err);
            assert_eq!(err.to_string(), *msg);
        }

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path), Err(RecordError::Format(..))));
        assert!(matches!(load(&dir.path().join("missing.json")), Err(RecordError::Io(..))));
    }
}
