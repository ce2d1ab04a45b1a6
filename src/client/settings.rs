use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use log::{debug, warn};
use tokio::sync::watch;

use crate::catalog;

pub const CREDENTIAL_KEY: &str = "openrouter_api_key";
pub const MODEL_KEY: &str = "selected_model";

const CREDENTIAL_PREFIX: &str = "sk-or-v1-";

/// Opaque string key-value storage that survives restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A JSON object on disk, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // Unreadable contents are dropped; the next `set` rewrites the file.
                warn!("Ignoring corrupt settings file {}: {}", self.path.display(), e);
                Ok(BTreeMap::new())
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("settings store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("settings store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub credential: String,
    pub model: String,
}

/// Advisory only; an unrecognized key is still sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Empty,
    LooksValid,
    Unrecognized,
}

pub fn credential_status(credential: &str) -> CredentialStatus {
    if credential.is_empty() {
        CredentialStatus::Empty
    } else if credential.starts_with(CREDENTIAL_PREFIX) {
        CredentialStatus::LooksValid
    } else {
        CredentialStatus::Unrecognized
    }
}

/// Credential and model selection, loaded once and written through on change.
pub struct Settings<S: KeyValueStore> {
    store: S,
    current: watch::Sender<Snapshot>,
}

impl<S: KeyValueStore> Settings<S> {
    pub fn load(store: S) -> Result<Self> {
        let credential = store.get(CREDENTIAL_KEY)?.unwrap_or_default();
        let model = store
            .get(MODEL_KEY)?
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| catalog::default_model().id.to_string());
        let (current, _) = watch::channel(Snapshot { credential, model });
        Ok(Self { store, current })
    }

    pub fn get(&self) -> Snapshot {
        self.current.borrow().clone()
    }

    pub fn credential(&self) -> String {
        self.current.borrow().credential.clone()
    }

    pub fn model(&self) -> String {
        self.current.borrow().model.clone()
    }

    pub fn credential_status(&self) -> CredentialStatus {
        credential_status(&self.current.borrow().credential)
    }

    /// Receives every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.current.subscribe()
    }

    /// An empty credential is kept in memory but never written.
    pub fn set_credential(&mut self, credential: &str) -> Result<()> {
        if !credential.is_empty() {
            self.store.set(CREDENTIAL_KEY, credential)?;
        }
        self.publish(|snapshot| snapshot.credential = credential.to_string());
        Ok(())
    }

    pub fn set_model(&mut self, model: &str) -> Result<()> {
        self.store.set(MODEL_KEY, model)?;
        self.publish(|snapshot| snapshot.model = model.to_string());
        Ok(())
    }

    fn publish(&self, update: impl FnOnce(&mut Snapshot)) {
        let mut next = self.get();
        update(&mut next);
        self.current.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_first_catalog_model() {
        let settings = Settings::load(MemoryStore::default()).unwrap();
        assert_eq!(settings.model(), "openai/gpt-4o");
        assert_eq!(settings.credential(), "");
        assert_eq!(settings.credential_status(), CredentialStatus::Empty);
    }

    #[test]
    fn values_survive_reload_from_memory() {
        let store = MemoryStore::default();
        let mut settings = Settings::load(store.clone()).unwrap();
        settings.set_credential("sk-or-v1-abc").unwrap();
        settings.set_model("deepseek/deepseek-chat").unwrap();
        drop(settings);

        let reloaded = Settings::load(store).unwrap();
        assert_eq!(
            reloaded.get(),
            Snapshot {
                credential: "sk-or-v1-abc".into(),
                model: "deepseek/deepseek-chat".into(),
            }
        );
    }

    #[test]
    fn values_survive_reload_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::load(FileStore::new(&path)).unwrap();
        settings.set_model("mistralai/mistral-large").unwrap();
        settings.set_credential("sk-or-v1-disk").unwrap();

        let reloaded = Settings::load(FileStore::new(&path)).unwrap();
        assert_eq!(reloaded.model(), "mistralai/mistral-large");
        assert_eq!(reloaded.credential(), "sk-or-v1-disk");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults_and_is_repaired() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"openrouter_api_key": "sk-or-v1-x", "selected_model": "#,
        )
        .unwrap();

        let mut settings = Settings::load(FileStore::new(&path)).unwrap();
        assert_eq!(settings.model(), catalog::default_model().id);
        assert_eq!(settings.credential(), "");

        settings.set_credential("sk-or-v1-fresh").unwrap();
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries.get(CREDENTIAL_KEY).map(String::as_str), Some("sk-or-v1-fresh"));

        let reloaded = Settings::load(FileStore::new(&path)).unwrap();
        assert_eq!(reloaded.credential(), "sk-or-v1-fresh");
    }

    #[test]
    fn empty_credential_is_not_persisted() {
        let store = MemoryStore::default();
        let mut settings = Settings::load(store.clone()).unwrap();
        settings.set_credential("sk-or-v1-keep").unwrap();
        settings.set_credential("").unwrap();
        assert_eq!(settings.credential(), "");

        let reloaded = Settings::load(store).unwrap();
        assert_eq!(reloaded.credential(), "sk-or-v1-keep");
    }

    #[test]
    fn subscribers_see_changes() {
        let mut settings = Settings::load(MemoryStore::default()).unwrap();
        let mut rx = settings.subscribe();
        settings.set_model("x-ai/grok-beta").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().model, "x-ai/grok-beta");
    }

    #[test]
    fn credential_status_is_prefix_based() {
        assert_eq!(credential_status(""), CredentialStatus::Empty);
        assert_eq!(credential_status("sk-or-v1-123"), CredentialStatus::LooksValid);
        assert_eq!(credential_status("sk-ant-123"), CredentialStatus::Unrecognized);
    }
}
