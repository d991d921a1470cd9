#![allow(dead_code)]

use petplugin_core::commands::{CommandMap, CommandMapProvider, HostCommand};
use petplugin_core::permissions::PermissionsCache;
use petplugin_core::pets::{DefaultPetKeys, PetKeyData};
use petplugin_core::server::{PlayerSender, SimpleCommandMap};
use std::rc::Rc;

pub fn player(permissions: &[&str]) -> PlayerSender {
    PlayerSender::new("Steve", false, PermissionsCache::from_nodes(permissions))
}

pub fn operator() -> PlayerSender {
    PlayerSender::new("Alex", true, PermissionsCache::new())
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}

/// Built-ins used by registry tests instead of the full catalog.
pub struct FixedPetKeys(pub Vec<PetKeyData>);

impl DefaultPetKeys for FixedPetKeys {
    fn default_pet_keys(&self) -> Vec<PetKeyData> {
        self.0.clone()
    }
}

/// Wraps the in-memory command map and records every install.
#[derive(Default)]
pub struct RecordingCommandMap {
    pub inner: SimpleCommandMap,
    pub installs: Vec<String>,
}

impl CommandMap for RecordingCommandMap {
    fn get_command(&self, name: &str) -> Option<Rc<HostCommand>> {
        self.inner.get_command(name)
    }

    fn register(&mut self, fallback_prefix: &str, command: Rc<HostCommand>) -> bool {
        self.installs.push(command.name().to_string());
        self.inner.register(fallback_prefix, command)
    }
}

impl CommandMapProvider for RecordingCommandMap {
    fn command_map(&mut self) -> Option<&mut dyn CommandMap> {
        Some(self as &mut dyn CommandMap)
    }
}

/// A host whose command map cannot be found.
pub struct MissingCommandMap;

impl CommandMapProvider for MissingCommandMap {
    fn command_map(&mut self) -> Option<&mut dyn CommandMap> {
        None
    }
}
