//! # Configuration
//!
//! Configuration is loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `REGDESK_MOUNTAINS_FILE`, `REGDESK_MENUS_FILE`,
//!    `REGDESK_REGISTRATIONS_FILE`, `REGDESK_CUSTOMERS_FILE`, `REGDESK_ORDERS_FILE`.
//! 2. **Config file**: `--config <FILE>`, or `<data-dir>/regdesk.toml` when present.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default |
//! |-----|---------|
//! | `files.mountains` | `MountainList.csv` |
//! | `files.feast_menus` | `FeastMenu.csv` |
//! | `files.registrations` | `registrations.dat` |
//! | `files.customers` | `customers.dat` |
//! | `files.feast_orders` | `feast_orders.dat` |
//!
//! Relative paths are resolved against the data directory.

use std::io;
use std::path::{Path, PathBuf};

use confique::Config;

use crate::error::{RegdeskError, Result};

pub const CONFIG_FILENAME: &str = "regdesk.toml";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct RegdeskConfig {
    #[config(nested)]
    pub files: FilesConfig,
}

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct FilesConfig {
    /// Mountain reference list (`Code, Mountain, Province, Description`).
    #[config(default = "MountainList.csv", env = "REGDESK_MOUNTAINS_FILE")]
    pub mountains: PathBuf,

    /// Feast menu reference list (`Code,Name,Price,Ingredients`).
    #[config(default = "FeastMenu.csv", env = "REGDESK_MENUS_FILE")]
    pub feast_menus: PathBuf,

    #[config(default = "registrations.dat", env = "REGDESK_REGISTRATIONS_FILE")]
    pub registrations: PathBuf,

    #[config(default = "customers.dat", env = "REGDESK_CUSTOMERS_FILE")]
    pub customers: PathBuf,

    #[config(default = "feast_orders.dat", env = "REGDESK_ORDERS_FILE")]
    pub feast_orders: PathBuf,
}

/// Absolute locations of every data file, after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub mountains: PathBuf,
    pub feast_menus: PathBuf,
    pub registrations: PathBuf,
    pub customers: PathBuf,
    pub feast_orders: PathBuf,
}

impl RegdeskConfig {
    /// Loads configuration for `data_dir`. An explicit config file must exist;
    /// the implicit `<data_dir>/regdesk.toml` is optional.
    pub fn load(data_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(RegdeskError::Io(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("config file not found: {}", path.display()),
                    )));
                }
                path.to_path_buf()
            }
            None => data_dir.join(CONFIG_FILENAME),
        };

        let config = RegdeskConfig::builder().env().file(&file).load()?;
        Ok(config)
    }

    pub fn resolve(&self, data_dir: &Path) -> DataPaths {
        let files = &self.files;
        DataPaths {
            mountains: data_dir.join(&files.mountains),
            feast_menus: data_dir.join(&files.feast_menus),
            registrations: data_dir.join(&files.registrations),
            customers: data_dir.join(&files.customers),
            feast_orders: data_dir.join(&files.feast_orders),
        }
    }
}
