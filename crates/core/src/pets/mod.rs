pub mod catalog;

use crate::keys::{KeyError, NamespacedKey};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const PETS_DATA_FILE: &str = "pets-data.yml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PetKeyData {
    pub namespace: String,
    pub key: String,
    #[serde(default)]
    pub permission: String,
}

impl PetKeyData {
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
        permission: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            permission: permission.into(),
        }
    }

    pub fn to_namespaced_key(&self) -> Result<NamespacedKey, KeyError> {
        NamespacedKey::new(self.namespace.clone(), self.key.clone())
    }

    fn same_key(&self, other: &PetKeyData) -> bool {
        self.namespace == other.namespace && self.key == other.key
    }
}

/// Source of the pet keys that are always present, whatever the data file says.
pub trait DefaultPetKeys {
    fn default_pet_keys(&self) -> Vec<PetKeyData>;
}

#[derive(Serialize)]
struct PetsFile<'a> {
    pets: &'a [PetKeyData],
}

/// Merges built-in pet keys with the user entries from `pets-data.yml`.
pub struct PetKeyManager {
    config_file: PathBuf,
    defaults: Box<dyn DefaultPetKeys>,
    pet_keys: Vec<PetKeyData>,
}

impl PetKeyManager {
    /// Creates the manager and loads it right away.
    pub fn new(data_folder: impl AsRef<Path>, defaults: impl DefaultPetKeys + 'static) -> Result<Self> {
        let mut manager = PetKeyManager {
            config_file: data_folder.as_ref().join(PETS_DATA_FILE),
            defaults: Box::new(defaults),
            pet_keys: Vec::new(),
        };
        manager.load()?;
        Ok(manager)
    }

    /// Rebuilds the key list. Returns how many user entries were merged in.
    pub fn load(&mut self) -> Result<usize> {
        self.pet_keys.clear();
        self.pet_keys.extend(self.defaults.default_pet_keys());

        if !self.config_file.exists() {
            self.save_default_config()?;
            return Ok(0);
        }

        let contents = fs::read(&self.config_file)
            .with_context(|| format!("Failed to read {}", self.config_file.display()))?;
        let user_keys = match parse_user_entries(&contents) {
            Ok(keys) => keys,
            Err(err) => {
                warn!(
                    "Could not parse {}, ignoring user pet keys: {}",
                    self.config_file.display(),
                    err
                );
                Vec::new()
            }
        };

        let mut merged = 0;
        for entry in user_keys {
            if self.pet_keys.iter().any(|existing| existing.same_key(&entry)) {
                debug!(
                    "Skipping duplicate pet key {}:{}",
                    entry.namespace, entry.key
                );
                continue;
            }
            self.pet_keys.push(entry);
            merged += 1;
        }
        Ok(merged)
    }

    fn save_default_config(&self) -> Result<()> {
        let defaults = self.defaults.default_pet_keys();
        let yaml = serde_yaml_ng::to_string(&PetsFile { pets: &defaults })
            .context("Failed to serialize default pet keys")?;
        if let Some(parent) = self.config_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.config_file, yaml)
            .with_context(|| format!("Failed to write {}", self.config_file.display()))?;
        info!(
            "Wrote {} default pet keys to {}",
            defaults.len(),
            self.config_file.display()
        );
        Ok(())
    }

    /// A copy of every key, built-ins first.
    pub fn all(&self) -> Vec<PetKeyData> {
        self.pet_keys.clone()
    }

    pub fn len(&self) -> usize {
        self.pet_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pet_keys.is_empty()
    }

    pub fn find_by_key(&self, key: &NamespacedKey) -> Option<&PetKeyData> {
        self.pet_keys
            .iter()
            .find(|entry| entry.namespace == key.namespace() && entry.key == key.key())
    }

    pub fn find_by_permission(&self, permission: &str) -> Option<&PetKeyData> {
        self.pet_keys
            .iter()
            .find(|entry| !entry.permission.is_empty() && entry.permission.eq_ignore_ascii_case(permission))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_file
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads the `pets` list. Entries without a namespace or key are dropped.
/// Fails on anything that is not a UTF-8 YAML document.
fn parse_user_entries(contents: &[u8]) -> Result<Vec<PetKeyData>> {
    let doc: Value = serde_yaml_ng::from_str(std::str::from_utf8(contents)?)?;
    let Some(pets) = doc.get("pets").and_then(Value::as_sequence) else {
        return Ok(Vec::new());
    };

    let entries = pets
        .iter()
        .filter_map(|entry| {
            if !entry.is_mapping() {
                return None;
            }
            let namespace = entry.get("namespace").and_then(scalar_to_string)?;
            let key = entry.get("key").and_then(scalar_to_string)?;
            let permission = entry
                .get("permission")
                .and_then(scalar_to_string)
                .unwrap_or_default();
            Some(PetKeyData {
                namespace,
                key,
                permission,
            })
        })
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_incomplete_entries() {
        let yaml = r#"
pets:
  - namespace: custom
    key: dragon
    permission: mcpets.dragon
  - namespace: custom
  - key: orphan
  - namespace: custom
    key: 42
  - just a string
"#;
        let entries = parse_user_entries(yaml.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                PetKeyData::new("custom", "dragon", "mcpets.dragon"),
                PetKeyData::new("custom", "42", ""),
            ]
        );
    }

    #[test]
    fn parse_without_pets_section() {
        assert!(parse_user_entries(b"other: 1").unwrap().is_empty());
        assert!(parse_user_entries(b"pets: nope").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_broken_yaml() {
        assert!(parse_user_entries(b"pets: [unclosed").is_err());
    }

    #[test]
    fn parse_rejects_invalid_utf8() {
        assert!(parse_user_entries(b"pets:\n  - namespace: caf\xe9\n    key: x\n").is_err());
    }
}
