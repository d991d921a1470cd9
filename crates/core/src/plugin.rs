use crate::commands::builtin;
use crate::commands::{CommandMapProvider, CommandRegistrar, HostCommand};
use crate::config::PluginConfig;
use crate::pets::catalog::CatalogPetKeys;
use crate::pets::{PetKeyData, PetKeyManager};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use tracing::info;

/// Plugin lifecycle: owns the pet registry and the command registrar.
pub struct PetPlugin {
    config: PluginConfig,
    pets: Rc<RefCell<PetKeyManager>>,
    registrar: CommandRegistrar,
    pets_command: Rc<HostCommand>,
}

impl PetPlugin {
    /// Loads pet keys and installs the plugin's commands into the host.
    pub fn enable(config: PluginConfig, host: &mut dyn CommandMapProvider) -> Result<PetPlugin> {
        info!("Enabling {}...", config.plugin_name);
        let start_time = Instant::now();

        let pets = PetKeyManager::new(&config.data_folder, CatalogPetKeys)
            .context("Failed to load pet keys")?;
        info!("Loaded {} pet keys", pets.len());
        let pets = Rc::new(RefCell::new(pets));

        let mut registrar = CommandRegistrar::new();
        let pets_command = builtin::pets_command(Rc::clone(&pets), &config).register(&mut registrar)?;
        registrar.flush_all(&config.plugin_name, host)?;

        info!("Done! Enable took {:?}", start_time.elapsed());
        Ok(PetPlugin {
            config,
            pets,
            registrar,
            pets_command,
        })
    }

    /// Reloads `pets-data.yml` and queues the installed `/pets` command again,
    /// as a reloaded plugin would. Names that are already installed are left
    /// alone, so this normally registers nothing.
    pub fn reload(&mut self, host: &mut dyn CommandMapProvider) -> Result<usize> {
        let merged = self.pets.borrow_mut().load()?;
        info!("Reloaded pet keys, {} from file", merged);

        let command = &self.pets_command;
        self.registrar.enqueue(
            command.name(),
            command.permission().unwrap_or_default(),
            false,
            Rc::clone(command),
        );
        let registered = self.registrar.flush_all(&self.config.plugin_name, host)?;
        Ok(registered)
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn pet_keys(&self) -> Vec<PetKeyData> {
        self.pets.borrow().all()
    }

    pub fn registrar(&self) -> &CommandRegistrar {
        &self.registrar
    }

    /// The `/pets` command object installed by [`PetPlugin::enable`].
    pub fn pets_command(&self) -> &Rc<HostCommand> {
        &self.pets_command
    }
}
