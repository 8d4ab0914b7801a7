use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::PuppetError;
use crate::common::result::{PuppetResult, ResultExt};
use crate::domain::entities::{BranchSnapshot, Configuration, ConfigurationSet};

/// Directory under the home directory that holds the store
pub const CONFIG_DIR_NAME: &str = ".puppet";

/// File name of the store
pub const CONFIG_FILE_NAME: &str = "configs.json";

/// What `save` did to the store file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The store did not exist yet and was created with this configuration only
    Created,
    /// The configuration was upserted into an existing store
    Updated,
}

/// Answer to a `get` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLookup {
    /// Every configuration name in the store
    Names(Vec<String>),
    /// The requested configuration
    Found(Configuration),
    /// The requested configuration is not in the store
    Missing(String),
}

/// Persists named branch configurations as a single JSON document.
///
/// Every write replaces the whole file: the new contents go to a sibling
/// temporary file which is then renamed over `configs.json`.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
    file: PathBuf,
}

impl ConfigStore {
    /// Store located in `dir` (the file is `dir/configs.json`)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(CONFIG_FILE_NAME);
        Self { dir, file }
    }

    /// Store at `<home>/.puppet/configs.json`
    pub fn default_location() -> PuppetResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| PuppetError::internal_error("Cannot determine the home directory"))?;
        Ok(Self::new(home.join(CONFIG_DIR_NAME)))
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Directory holding the store file
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the store file has been created
    pub fn exists(&self) -> bool {
        self.file.exists()
    }

    /// Read the store. Fails with [`PuppetError::ConfigNotFound`] if it was never created.
    pub fn load(&self) -> PuppetResult<ConfigurationSet> {
        self.probe()?
            .ok_or_else(|| PuppetError::config_not_found(&self.file))
    }

    /// Read the store, treating a missing file as `None`
    pub fn probe(&self) -> PuppetResult<Option<ConfigurationSet>> {
        if !self.file.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.file)
            .with_filesystem_error("Failed to read config file", Some(self.file.clone()))?;

        let set = serde_json::from_str(&contents).map_err(|e| {
            PuppetError::serialization_error_with_source(
                format!("Invalid config file {}", self.file.display()),
                e,
            )
        })?;

        Ok(Some(set))
    }

    /// Upsert `name` with `entries`, creating the store on first use
    pub fn save(&self, name: &str, entries: Vec<BranchSnapshot>) -> PuppetResult<SaveOutcome> {
        let (mut set, outcome) = match self.probe()? {
            Some(set) => (set, SaveOutcome::Updated),
            None => (ConfigurationSet::new(), SaveOutcome::Created),
        };

        set.upsert(name, entries);
        self.write(&set)?;

        tracing::debug!(config = name, path = %self.file.display(), ?outcome, "Saved configuration");
        Ok(outcome)
    }

    /// Delete `name`. Returns `false` and leaves the file untouched if it is absent.
    pub fn remove(&self, name: &str) -> PuppetResult<bool> {
        let mut set = self.load()?;

        if !set.remove(name) {
            return Ok(false);
        }

        self.write(&set)?;
        tracing::debug!(config = name, "Removed configuration");
        Ok(true)
    }

    /// List names (`None`) or fetch one configuration (`Some(name)`)
    pub fn get(&self, name: Option<&str>) -> PuppetResult<ConfigLookup> {
        let set = self.load()?;

        Ok(match name {
            None => ConfigLookup::Names(set.names()),
            Some(name) => match set.get(name) {
                Some(config) => ConfigLookup::Found(config),
                None => ConfigLookup::Missing(name.to_string()),
            },
        })
    }

    /// Fully rewrite the store file
    fn write(&self, set: &ConfigurationSet) -> PuppetResult<()> {
        fs::create_dir_all(&self.dir).with_filesystem_error(
            "Failed to create config directory",
            Some(self.dir.clone()),
        )?;

        let json = serde_json::to_string(set)?;

        let tmp_path = self.file.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_filesystem_error("Failed to write config file", Some(tmp_path.clone()))?;
        fs::rename(&tmp_path, &self.file)
            .with_filesystem_error("Failed to replace config file", Some(self.file.clone()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> ConfigStore {
        ConfigStore::new(temp_dir.path().join(CONFIG_DIR_NAME))
    }

    fn entries() -> Vec<BranchSnapshot> {
        vec![
            BranchSnapshot::new("repoA", "main"),
            BranchSnapshot::new("repoB", "feature"),
        ]
    }

    #[test]
    fn test_load_missing_store_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let result = store.load();
        assert!(matches!(result, Err(PuppetError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_probe_missing_store_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert_eq!(store.probe().unwrap(), None);
    }

    #[test]
    fn test_first_save_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        assert!(!store.dir().exists());

        let outcome = store.save("default", entries()).unwrap();

        assert_eq!(outcome, SaveOutcome::Created);
        assert!(store.exists());
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            r#"{"default":[["repoA","main"],["repoB","feature"]]}"#
        );
    }

    #[test]
    fn test_save_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.save("default", entries()).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();

        let outcome = store.save("default", entries()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();

        assert_eq!(outcome, SaveOutcome::Updated);
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_overwrites_and_keeps_other_configs() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let replacement = vec![BranchSnapshot::new("repoA", "release")];

        store.save("default", entries()).unwrap();
        store.save("other", entries()).unwrap();
        store.save("default", replacement.clone()).unwrap();

        assert_eq!(
            store.get(Some("default")).unwrap(),
            ConfigLookup::Found(Configuration::new("default", replacement))
        );
        assert_eq!(
            store.get(None).unwrap(),
            ConfigLookup::Names(vec!["default".to_string(), "other".to_string()])
        );
    }

    #[test]
    fn test_round_trip_preserves_entry_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        let ordered = vec![
            BranchSnapshot::new("zeta", "main"),
            BranchSnapshot::new("alpha", "dev"),
            BranchSnapshot::new("mid", "hotfix"),
        ];

        store.save("ordered", ordered.clone()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.get("ordered").unwrap().entries, ordered);
    }

    #[test]
    fn test_remove_missing_key_leaves_store_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.save("default", entries()).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let removed = store.remove("missing").unwrap();

        assert!(!removed);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_remove_existing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.save("default", entries()).unwrap();
        store.save("other", entries()).unwrap();

        assert!(store.remove("default").unwrap());
        assert_eq!(
            store.get(None).unwrap(),
            ConfigLookup::Names(vec!["other".to_string()])
        );
    }

    #[test]
    fn test_remove_without_store_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(matches!(
            store.remove("default"),
            Err(PuppetError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_get_missing_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.save("default", entries()).unwrap();

        assert_eq!(
            store.get(Some("nope")).unwrap(),
            ConfigLookup::Missing("nope".to_string())
        );
    }

    #[test]
    fn test_corrupt_store_is_a_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(
            store.load(),
            Err(PuppetError::SerializationError { .. })
        ));
    }

    #[test]
    fn test_no_temporary_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.save("default", entries()).unwrap();

        let names: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![CONFIG_FILE_NAME.to_string()]);
    }
}
