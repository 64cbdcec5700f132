//! Configuration manager for mainta.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classify::RuleTable;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Instance name, shown by the UI layer.
    pub name: String,
    /// Flat-file storage locations.
    pub storage: Storage,
    /// Password policy applied on signup and login.
    pub password: PasswordPolicy,
    /// Which classifier rule table to apply on assessment.
    pub rules: RuleProfile,
    version: String,
    #[serde(skip)]
    path: PathBuf,
}

/// Flat-file storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Directory holding the record files.
    pub data_dir: PathBuf,
    pub users_file: String,
    pub machines_file: String,
    pub parts_file: String,
    pub selections_file: String,
    pub session_file: String,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            users_file: "users.txt".into(),
            machines_file: "machines.txt".into(),
            parts_file: "parts.txt".into(),
            selections_file: "selections.txt".into(),
            session_file: "session.txt".into(),
        }
    }
}

impl Storage {
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn machines_path(&self) -> PathBuf {
        self.data_dir.join(&self.machines_file)
    }

    pub fn parts_path(&self) -> PathBuf {
        self.data_dir.join(&self.parts_file)
    }

    pub fn selections_path(&self) -> PathBuf {
        self.data_dir.join(&self.selections_file)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(&self.session_file)
    }
}

/// Password policy configuration.
///
/// One deployment of the original system required exactly 8 characters,
/// another accepted anything. The policy is configuration, not code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Exact required password length, when set.
    pub exact_length: Option<usize>,
}

/// Classifier rule profile.
///
/// Two divergent rule tables shipped in the original deployments; neither
/// is authoritative, so the choice is surfaced here.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RuleProfile {
    /// Fixed problem-count thresholds.
    #[default]
    Thresholds,
    /// Compare the problem count against the total number of checks.
    FractionOfTotal,
}

impl RuleProfile {
    /// Build the [`RuleTable`] for this profile.
    pub fn table(self) -> RuleTable {
        match self {
            RuleProfile::Thresholds => RuleTable::thresholds(),
            RuleProfile::FractionOfTotal => RuleTable::fraction_of_total(),
        }
    }
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    pub fn read(self) -> Arc<Self> {
        let file_path = if self.path.is_file() {
            &self.path
        } else {
            &Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
        };

        match File::open(file_path) {
            Ok(file) => {
                let mut config: Configuration =
                    match serde_yaml::from_reader(file) {
                        Ok(config) => config,
                        Err(err) => {
                            return Arc::new(self.error(err));
                        },
                    };

                // set app version.
                config.version = VERSION.to_owned();

                Arc::new(config)
            },
            Err(err) => Arc::new(self.error(err)),
        }
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "`config.yaml` file not found");
        Self {
            version: VERSION.to_owned(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            "name: plant-a\npassword:\n  exact_length: 8\nrules: fraction_of_total"
        )
        .unwrap();

        let config = Configuration::default().path(path).read();
        assert_eq!(config.name, "plant-a");
        assert_eq!(config.password.exact_length, Some(8));
        assert_eq!(config.rules, RuleProfile::FractionOfTotal);
        // unspecified sections fall back to defaults.
        assert_eq!(config.storage.users_file, "users.txt");
    }

    #[test]
    fn test_read_missing_file_falls_back() {
        let config = Configuration::default()
            .path(PathBuf::from("/nonexistent/config.yaml"))
            .read();
        assert_eq!(config.storage, Storage::default());
        assert_eq!(config.password, PasswordPolicy::default());
        assert_eq!(config.rules, RuleProfile::Thresholds);
    }
}
