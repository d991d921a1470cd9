use super::host::{CommandExecutor, CommandMapProvider, CommandSender, HostCommand};
use rustc_hash::FxHashSet;
use std::fmt::Write;
use std::rc::Rc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("Could not locate the host command map, no commands can be registered")]
    CommandMapUnavailable,
}

#[derive(Debug)]
struct PendingRegistration {
    name: String,
    permission: String,
    is_admin: bool,
    command: Rc<HostCommand>,
}

/// Queues command objects and installs them into the host command map.
///
/// Names and aliases that were installed once are remembered for the life of
/// the registrar, so flushing again after a plugin reload never installs a
/// second copy.
#[derive(Debug, Default)]
pub struct CommandRegistrar {
    pending: Vec<PendingRegistration>,
    registered: FxHashSet<String>,
    total_registered: usize,
    warned_reload: bool,
}

impl CommandRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(
        &mut self,
        name: impl Into<String>,
        permission: impl Into<String>,
        is_admin: bool,
        command: Rc<HostCommand>,
    ) {
        self.pending.push(PendingRegistration {
            name: name.into(),
            permission: permission.into(),
            is_admin,
            command,
        });
    }

    /// Installs every queued command and its aliases, then empties the queue.
    /// Returns how many names were installed by this call.
    pub fn flush_all(
        &mut self,
        plugin_name: &str,
        host: &mut dyn CommandMapProvider,
    ) -> Result<usize, RegistrarError> {
        if self.total_registered > 0 && !self.warned_reload {
            warn!(
                "Detected plugin reload! Custom command registrations should be managed carefully to avoid duplicates."
            );
            self.warned_reload = true;
        }

        let command_map = host
            .command_map()
            .ok_or(RegistrarError::CommandMapUnavailable)?;
        let prefix = plugin_name.to_lowercase();

        let mut count = 0;
        let mut log_list = String::new();
        for pending in self.pending.drain(..) {
            if !self.registered.contains(&pending.name)
                && command_map.get_command(&pending.name).is_none()
            {
                command_map.register(&prefix, Rc::clone(&pending.command));
                count += 1;
                self.registered.insert(pending.name.clone());
                let _ = writeln!(
                    log_list,
                    "- {} (permission: {}{})",
                    pending.name,
                    pending.permission,
                    if pending.is_admin { ", admin" } else { "" }
                );
            }

            for alias in pending.command.aliases() {
                if self.registered.contains(alias) || command_map.get_command(alias).is_some() {
                    continue;
                }
                let shim = AliasCommand::wrap(alias, &pending.command);
                command_map.register(&prefix, Rc::new(shim));
                count += 1;
                self.registered.insert(alias.clone());
                let _ = writeln!(log_list, "- {} (alias for {})", alias, pending.name);
            }
        }

        self.total_registered += count;
        if count > 0 {
            info!("{} custom command(s) registered:\n{}", count, log_list);
        }
        Ok(count)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    pub fn registered_names(&self) -> &FxHashSet<String> {
        &self.registered
    }

    pub fn total_registered(&self) -> usize {
        self.total_registered
    }
}

/// Makes an alias name run the original command.
struct AliasCommand {
    original: Rc<HostCommand>,
}

impl AliasCommand {
    /// Usage text is left empty on the shim.
    fn wrap(alias: &str, original: &Rc<HostCommand>) -> HostCommand {
        let executor = Rc::new(AliasCommand {
            original: Rc::clone(original),
        });
        HostCommand::new(alias, executor)
            .with_description(original.description())
            .with_permission(original.permission().unwrap_or_default())
            .with_permission_message(original.permission_message().map(str::to_string))
    }
}

impl CommandExecutor for AliasCommand {
    fn on_command(
        &self,
        sender: &dyn CommandSender,
        _command: &HostCommand,
        label: &str,
        args: &[String],
    ) -> bool {
        self.original.execute(sender, label, args)
    }

    fn on_tab_complete(
        &self,
        sender: &dyn CommandSender,
        _command: &HostCommand,
        alias: &str,
        args: &[String],
    ) -> Vec<String> {
        self.original.tab_complete(sender, alias, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::CommandMap;
    use crate::text::TextComponent;
    use rustc_hash::FxHashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{self, Layer, SubscriberExt};

    struct Echo;

    impl CommandExecutor for Echo {
        fn on_command(
            &self,
            _sender: &dyn CommandSender,
            command: &HostCommand,
            _label: &str,
            _args: &[String],
        ) -> bool {
            command.name() == "pet"
        }

        fn on_tab_complete(
            &self,
            _sender: &dyn CommandSender,
            _command: &HostCommand,
            _alias: &str,
            _args: &[String],
        ) -> Vec<String> {
            vec!["give".to_string()]
        }
    }

    struct Console;

    impl CommandSender for Console {
        fn name(&self) -> &str {
            "CONSOLE"
        }

        fn has_permission(&self, _node: &str) -> bool {
            true
        }

        fn is_operator(&self) -> bool {
            false
        }

        fn send_message(&self, _message: TextComponent) {}
    }

    #[derive(Default)]
    struct Map {
        commands: FxHashMap<String, Rc<HostCommand>>,
        installs: Vec<String>,
    }

    impl CommandMap for Map {
        fn get_command(&self, name: &str) -> Option<Rc<HostCommand>> {
            self.commands.get(name).cloned()
        }

        fn register(&mut self, fallback_prefix: &str, command: Rc<HostCommand>) -> bool {
            self.installs
                .push(format!("{}:{}", fallback_prefix, command.name()));
            self.commands
                .insert(command.name().to_string(), command)
                .is_none()
        }
    }

    impl CommandMapProvider for Map {
        fn command_map(&mut self) -> Option<&mut dyn CommandMap> {
            Some(self as &mut dyn CommandMap)
        }
    }

    struct Missing;

    impl CommandMapProvider for Missing {
        fn command_map(&mut self) -> Option<&mut dyn CommandMap> {
            None
        }
    }

    fn pet_command() -> Rc<HostCommand> {
        Rc::new(
            HostCommand::new("pet", Rc::new(Echo))
                .with_usage("/pet")
                .with_aliases(vec!["pets".to_string(), "펫".to_string()])
                .with_permission("mcpets.use"),
        )
    }

    #[test]
    fn installs_name_and_aliases_once() {
        let mut registrar = CommandRegistrar::new();
        let mut map = Map::default();
        let command = pet_command();

        registrar.enqueue("pet", "mcpets.use", false, Rc::clone(&command));
        assert_eq!(registrar.flush_all("PetPlugin", &mut map).unwrap(), 3);
        assert_eq!(map.installs, ["petplugin:pet", "petplugin:pets", "petplugin:펫"]);
        assert_eq!(registrar.pending_len(), 0);

        let names_after_first = registrar.registered_names().clone();
        registrar.enqueue("pet", "mcpets.use", false, command);
        assert_eq!(registrar.flush_all("PetPlugin", &mut map).unwrap(), 0);
        assert_eq!(map.installs.len(), 3);
        assert_eq!(*registrar.registered_names(), names_after_first);
        assert_eq!(registrar.total_registered(), 3);
        assert_eq!(registrar.pending_len(), 0);
    }

    #[test]
    fn alias_shim_forwards_to_original() {
        let mut registrar = CommandRegistrar::new();
        let mut map = Map::default();
        registrar.enqueue("pet", "", false, pet_command());
        registrar.flush_all("PetPlugin", &mut map).unwrap();

        let shim = map.get_command("pets").unwrap();
        assert_eq!(shim.usage(), "");
        assert_eq!(shim.permission(), Some("mcpets.use"));
        assert!(shim.aliases().is_empty());
        // The original command sees itself, not the shim.
        assert!(shim.execute(&Console, "pets", &[]));
        assert_eq!(shim.tab_complete(&Console, "pets", &[]), ["give"]);
    }

    #[test]
    fn skips_names_taken_by_other_plugins() {
        let mut registrar = CommandRegistrar::new();
        let mut map = Map::default();
        map.commands.insert(
            "pet".to_string(),
            Rc::new(HostCommand::new("pet", Rc::new(Echo))),
        );

        registrar.enqueue("pet", "", false, pet_command());
        assert_eq!(registrar.flush_all("PetPlugin", &mut map).unwrap(), 2);
        assert!(!registrar.is_registered("pet"));
        assert!(registrar.is_registered("pets"));
    }

    struct CountWarnings(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for CountWarnings {
        fn on_event(&self, event: &Event<'_>, _ctx: layer::Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn reload_warning_is_logged_once() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountWarnings(Arc::clone(&warnings)));

        tracing::subscriber::with_default(subscriber, || {
            let mut registrar = CommandRegistrar::new();
            let mut map = Map::default();

            registrar.enqueue("pet", "mcpets.use", false, pet_command());
            registrar.flush_all("PetPlugin", &mut map).unwrap();
            assert!(!registrar.warned_reload);
            assert_eq!(warnings.load(Ordering::SeqCst), 0);

            registrar.enqueue("pet", "mcpets.use", false, pet_command());
            registrar.flush_all("PetPlugin", &mut map).unwrap();
            assert!(registrar.warned_reload);
            assert_eq!(warnings.load(Ordering::SeqCst), 1);

            registrar.enqueue("pet", "mcpets.use", false, pet_command());
            registrar.flush_all("PetPlugin", &mut map).unwrap();
            assert!(registrar.warned_reload);
            assert_eq!(warnings.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn missing_command_map_keeps_queue() {
        let mut registrar = CommandRegistrar::new();
        registrar.enqueue("pet", "", false, pet_command());
        assert!(matches!(
            registrar.flush_all("PetPlugin", &mut Missing),
            Err(RegistrarError::CommandMapUnavailable)
        ));
        assert_eq!(registrar.pending_len(), 1);
    }
}
