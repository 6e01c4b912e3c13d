use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;

/// Writes any serializable value to `path` as pretty-printed JSON.
///
/// Used for archiving report snapshots alongside the CSV outputs.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

/// Reads a JSON file back into `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{RollingAnalysis, TransactionStore};
    use crate::domain::Transaction;

    use tempfile::TempDir;

    #[test]
    fn transactions_round_trip_through_json() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("transactions.json");
        let original = vec![
            Transaction::new("t1", "A1", 1, "CC", 10.0),
            Transaction::new("t2", "A2", 3, "AA", 7.25),
        ];

        save_json(&path, &original).expect("save");
        let restored: Vec<Transaction> = load_json(&path).expect("load");
        assert_eq!(restored, original);
    }

    #[test]
    fn rolling_report_snapshot_serializes_per_day() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("rolling.json");
        let store = TransactionStore::new(vec![
            Transaction::new("t1", "A1", 1, "CC", 10.0),
            Transaction::new("t2", "A1", 4, "CC", 20.0),
        ]);
        let report = RollingAnalysis::new(&store, ["CC"])
            .run(3)
            .expect("valid configuration");

        save_json(&path, &report).expect("save");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("\"4\""));
        assert!(written.contains("\"A1\""));
        assert!(written.contains("\"category_totals\""));
    }

    #[test]
    fn load_surfaces_malformed_json() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").expect("write");

        let err = load_json::<Vec<Transaction>>(&path).expect_err("should fail");
        assert!(matches!(
            err,
            crate::errors::AnalysisError::Serialization(_)
        ));
    }
}
