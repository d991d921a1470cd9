//! The surface of the host server that commands are installed into.

use crate::text::TextComponent;
use std::fmt;
use std::rc::Rc;

/// Whoever issued a command: a player, the console, a command block.
pub trait CommandSender {
    fn name(&self) -> &str;

    fn has_permission(&self, node: &str) -> bool;

    /// Whether the host treats this sender as an operator.
    fn is_operator(&self) -> bool;

    fn send_message(&self, message: TextComponent);
}

pub trait CommandExecutor {
    fn on_command(
        &self,
        sender: &dyn CommandSender,
        command: &HostCommand,
        label: &str,
        args: &[String],
    ) -> bool;

    fn on_tab_complete(
        &self,
        sender: &dyn CommandSender,
        command: &HostCommand,
        alias: &str,
        args: &[String],
    ) -> Vec<String>;
}

/// A command object as the host's command map sees it.
pub struct HostCommand {
    name: String,
    description: String,
    usage: String,
    aliases: Vec<String>,
    permission: Option<String>,
    permission_message: Option<String>,
    executor: Rc<dyn CommandExecutor>,
}

impl HostCommand {
    pub fn new(name: impl Into<String>, executor: Rc<dyn CommandExecutor>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            usage: String::new(),
            aliases: Vec::new(),
            permission: None,
            permission_message: None,
            executor,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Blank permissions are not set.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        let permission = permission.into();
        self.permission = (!permission.trim().is_empty()).then_some(permission);
        self
    }

    pub fn with_permission_message(mut self, message: Option<String>) -> Self {
        self.permission_message = message;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn permission_message(&self) -> Option<&str> {
        self.permission_message.as_deref()
    }

    pub fn execute(&self, sender: &dyn CommandSender, label: &str, args: &[String]) -> bool {
        self.executor.on_command(sender, self, label, args)
    }

    pub fn tab_complete(
        &self,
        sender: &dyn CommandSender,
        alias: &str,
        args: &[String],
    ) -> Vec<String> {
        self.executor.on_tab_complete(sender, self, alias, args)
    }
}

impl fmt::Debug for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCommand")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("aliases", &self.aliases)
            .field("permission", &self.permission)
            .finish()
    }
}

pub trait CommandMap {
    fn get_command(&self, name: &str) -> Option<Rc<HostCommand>>;

    /// Installs `command` under its name. Returns `false` when the plain name
    /// was taken and only the prefixed form got registered.
    fn register(&mut self, fallback_prefix: &str, command: Rc<HostCommand>) -> bool;
}

/// Hands out the host's command map, if it can be located.
pub trait CommandMapProvider {
    fn command_map(&mut self) -> Option<&mut dyn CommandMap>;
}
