use crate::commands::Messages;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use toml_edit::{value, DocumentMut};

pub const CONFIG_FILE: &str = "Config.toml";

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, i64, bool);

macro_rules! gen_config {
    (
        $( $name:ident: $type:ty = $default:expr),*
    ) => {
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
        pub struct PluginConfig {
            $(
                pub $name: $type,
            )*
        }

        impl Default for PluginConfig {
            fn default() -> Self {
                PluginConfig {
                    $(
                        $name: $default,
                    )*
                }
            }
        }

        impl PluginConfig {
            /// Reads the config, writing back any keys that were missing.
            pub fn load(config_file: impl AsRef<Path>) -> Result<PluginConfig> {
                let config_file = config_file.as_ref();
                let str = match fs::read_to_string(config_file) {
                    Ok(str) => str,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
                    Err(err) => {
                        return Err(err)
                            .with_context(|| format!("Failed to read {}", config_file.display()))
                    }
                };
                let mut doc = str
                    .parse::<DocumentMut>()
                    .with_context(|| format!("Failed to parse {}", config_file.display()))?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    fs::write(config_file, &patched)
                        .with_context(|| format!("Failed to write {}", config_file.display()))?;
                }

                toml::from_str(&patched)
                    .with_context(|| format!("Invalid values in {}", config_file.display()))
            }
        }
    };
}

gen_config! {
    plugin_name: String = "PetPlugin".to_string(),
    data_folder: String = "plugins/PetPlugin".to_string(),
    unknown_command_message: String = Messages::default().unknown_command,
    permission_denied_message: String = Messages::default().permission_denied,
    permission_message: String = Messages::default().permission_message,
    list_page_size: i64 = 10
}

impl PluginConfig {
    pub fn messages(&self) -> Messages {
        Messages {
            unknown_command: self.unknown_command_message.clone(),
            permission_denied: self.permission_denied_message.clone(),
            permission_message: self.permission_message.clone(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.list_page_size.clamp(1, 100) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = PluginConfig::load(&path).unwrap();
        assert_eq!(config, PluginConfig::default());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("plugin_name = \"PetPlugin\""));
        assert!(written.contains("list_page_size = 10"));
    }

    #[test]
    fn existing_values_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "# my server\nunknown_command_message = \"알 수 없는 명령어입니다.\"\n").unwrap();

        let config = PluginConfig::load(&path).unwrap();
        assert_eq!(config.messages().unknown_command, "알 수 없는 명령어입니다.");
        assert_eq!(config.plugin_name, "PetPlugin");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# my server"));
    }

    #[test]
    fn wrong_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "list_page_size = \"ten\"\n").unwrap();
        assert!(PluginConfig::load(&path).is_err());
    }
}
