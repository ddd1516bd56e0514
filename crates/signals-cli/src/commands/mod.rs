pub mod check_response;
pub mod import;
pub mod render;
pub mod send;

use anyhow::{Context, Result};
use signals_core::Signal;
use signals_infrastructure::{TomlSignalStore, default_store_dir};
use std::path::{Path, PathBuf};

/// Opens the store at `dir`, or at the default location.
pub fn open_store(dir: Option<PathBuf>) -> Result<TomlSignalStore> {
    let dir = match dir {
        Some(dir) => dir,
        None => default_store_dir().context("Failed to locate the signal store")?,
    };
    Ok(TomlSignalStore::new(dir))
}

/// Reads a signal from a TOML file.
pub fn read_signal(path: &Path) -> Result<Signal> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse signal in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use signals_core::signal::{Location, Point};
    use signals_core::{SignalRepository, State, Status, TargetApi};

    fn signal() -> Signal {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
        Signal {
            id: 12,
            text: "Lantaarnpaal kapot".to_string(),
            text_extra: None,
            created_at,
            incident_date_start: created_at,
            incident_date_end: None,
            location: Location::new(Point::new(4.88, 52.37)),
            priority: Default::default(),
            status: Status {
                state: State::TeVerzenden,
                text: None,
                user: None,
                target_api: Some(TargetApi::Sigmax),
                created_at,
            },
            category: Default::default(),
            reporter: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_imported_signal_file_lands_in_store() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("signal.toml");
        std::fs::write(&file, toml::to_string(&signal()).unwrap()).unwrap();

        let read = read_signal(&file).unwrap();
        assert_eq!(read, signal());

        import::execute(&file, Some(dir.path().join("store")))
            .await
            .unwrap();
        let store = open_store(Some(dir.path().join("store"))).unwrap();
        assert_eq!(store.find_by_id(12).await.unwrap(), Some(signal()));
    }

    #[test]
    fn test_read_signal_reports_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.toml");
        std::fs::write(&file, "id = \"not a number\"").unwrap();

        let err = read_signal(&file).unwrap_err();
        assert!(err.to_string().contains("Failed to parse signal"));
        assert!(read_signal(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_check_response_rejects_fault() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("fault.xml");
        std::fs::write(&file, "<soap:Fault xmlns:soap=\"urn:x\"/>").unwrap();

        assert!(check_response::execute(&file).is_err());
    }
}
