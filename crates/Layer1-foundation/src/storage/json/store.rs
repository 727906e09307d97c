//! JSON 파일 저장소

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON 설정 저장소
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 글로벌 설정 (~/.config/mixin/)
    pub fn global() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
            .join("mixin");
        Ok(Self::new(dir))
    }

    /// 프로젝트 설정 (.mixin/)
    pub fn project(root: impl Into<PathBuf>) -> Self {
        Self::new(root.into().join(".mixin"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    /// JSON 로드
    ///
    /// 읽기 실패는 `Error::Io`, 파싱 실패는 `Error::Json` 으로 올라갑니다.
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.file_path(filename);
        debug!(path = %path.display(), "Loading JSON");
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 파일이 없으면 `None`
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        if !self.exists(filename) {
            return Ok(None);
        }
        self.load(filename).map(Some)
    }

    /// JSON 저장 (디렉토리가 없으면 생성)
    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.file_path(filename);
        debug!(path = %path.display(), "Saving JSON");
        fs::write(&path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }

    /// 파일 존재 여부
    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EventsConfig;

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::project(dir.path());

        assert!(!store.exists("events.json"));
        store
            .save("events.json", &EventsConfig::new().ns("app"))
            .unwrap();

        assert!(store.exists("events.json"));
        assert!(store.base_dir().ends_with(".mixin"));

        let loaded: EventsConfig = store.load("events.json").unwrap();
        assert_eq!(loaded.ns, "app");
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let store = JsonStore::new(dir.path());
        let err = store.load::<EventsConfig>("broken.json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let err = store.load::<EventsConfig>("absent.json").unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(store.load_optional::<EventsConfig>("absent.json").unwrap().is_none());
    }
}
