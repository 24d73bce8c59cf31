use super::ListBackend;
use crate::error::{RegdeskError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

pub struct FsBackend<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> FsBackend<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(RegdeskError::Io)?;
        }
        Ok(parent)
    }
}

impl<R> ListBackend<R> for FsBackend<R>
where
    R: Serialize + DeserializeOwned,
{
    fn load(&self) -> Vec<R> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no saved list, starting empty");
            return Vec::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read saved list");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<R>>(&content) {
            Ok(records) => {
                info!(path = %self.path.display(), count = records.len(), "loaded list");
                records
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot decode saved list");
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[R]) -> Result<()> {
        let dir = self.ensure_parent()?;
        let content = serde_json::to_string_pretty(records).map_err(RegdeskError::Serialization)?;

        let stem = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "list".to_string());
        let tmp_file = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(RegdeskError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(RegdeskError::Io(e));
        }

        info!(path = %self.path.display(), count = records.len(), "saved list");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Customer;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let backend: FsBackend<Customer> = FsBackend::new(dir.path().join("customers.dat"));
        assert!(backend.load().is_empty());
    }

    #[test]
    fn garbage_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customers.dat");
        fs::write(&path, "\u{0}\u{1}not json").unwrap();
        let backend: FsBackend<Customer> = FsBackend::new(&path);
        assert!(backend.load().is_empty());
    }

    #[test]
    fn save_overwrites_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customers.dat");
        let backend: FsBackend<Customer> = FsBackend::new(&path);

        let first = vec![
            Customer::new("C0001", "An", "an@x.vn", "0912345678"),
            Customer::new("G0002", "Binh", "binh@x.vn", "0912345679"),
        ];
        backend.save(&first[..]).unwrap();
        backend.save(&first[..1]).unwrap();

        let loaded = backend.load();
        assert_eq!(loaded, first[..1].to_vec());

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("customers.dat");
        let backend: FsBackend<Customer> = FsBackend::new(&path);
        backend
            .save(&[Customer::new("K1234", "Chi", "chi@x.vn", "0981234567")])
            .unwrap();
        assert!(path.exists());
    }
}
