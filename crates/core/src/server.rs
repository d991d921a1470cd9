//! A minimal in-process host: a command map and two kinds of senders.
//!
//! Real servers provide their own implementations of [`CommandMap`] and
//! [`CommandSender`]. This one backs the console binary and the tests.

use crate::commands::{CommandMap, CommandMapProvider, CommandSender, HostCommand};
use crate::permissions::PermissionsCache;
use crate::text::TextComponent;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Commands by lowercase label. Every command is reachable as `name` and as
/// `prefix:name`; aliases are not installed automatically.
#[derive(Debug, Default)]
pub struct SimpleCommandMap {
    known_commands: FxHashMap<String, Rc<HostCommand>>,
}

impl SimpleCommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn split_line(command_line: &str) -> Option<(&str, Vec<String>)> {
        let line = command_line.trim_start();
        let line = line.strip_prefix('/').unwrap_or(line);
        let mut parts = line.split(' ');
        let label = parts.next().filter(|label| !label.is_empty())?;
        Some((label, parts.map(str::to_string).collect()))
    }

    /// Runs a command line such as `/pets list 2`. Returns `false` for
    /// unknown labels and for commands that did not handle the line.
    pub fn dispatch(&self, sender: &dyn CommandSender, command_line: &str) -> bool {
        let Some((label, args)) = Self::split_line(command_line.trim_end()) else {
            return false;
        };
        let args: Vec<String> = args.into_iter().filter(|arg| !arg.is_empty()).collect();
        match self.get_command(label) {
            Some(command) => command.execute(sender, label, &args),
            None => {
                debug!("{} issued unknown command: {}", sender.name(), label);
                false
            }
        }
    }

    /// A trailing space starts a new, empty token.
    pub fn tab_complete(&self, sender: &dyn CommandSender, command_line: &str) -> Vec<String> {
        let Some((label, args)) = Self::split_line(command_line) else {
            return Vec::new();
        };
        if args.is_empty() {
            let label = label.to_lowercase();
            let mut names: Vec<String> = self
                .known_commands
                .keys()
                .filter(|name| !name.contains(':') && name.starts_with(&label))
                .cloned()
                .collect();
            names.sort();
            return names;
        }
        match self.get_command(label) {
            Some(command) => command.tab_complete(sender, label, &args),
            None => Vec::new(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.known_commands.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

impl CommandMap for SimpleCommandMap {
    fn get_command(&self, name: &str) -> Option<Rc<HostCommand>> {
        self.known_commands.get(&name.to_lowercase()).cloned()
    }

    fn register(&mut self, fallback_prefix: &str, command: Rc<HostCommand>) -> bool {
        let name = command.name().to_lowercase();
        self.known_commands
            .insert(format!("{fallback_prefix}:{name}"), Rc::clone(&command));
        if self.known_commands.contains_key(&name) {
            return false;
        }
        self.known_commands.insert(name, command);
        true
    }
}

impl CommandMapProvider for SimpleCommandMap {
    fn command_map(&mut self) -> Option<&mut dyn CommandMap> {
        Some(self as &mut dyn CommandMap)
    }
}

/// The server console. Holds every permission but is not an operator.
#[derive(Debug, Default)]
pub struct ConsoleSender;

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn is_operator(&self) -> bool {
        false
    }

    fn send_message(&self, message: TextComponent) {
        println!("{}", message.to_legacy_text());
    }
}

/// A player whose received chat messages are kept in an inbox.
#[derive(Debug)]
pub struct PlayerSender {
    name: String,
    op: bool,
    permissions: PermissionsCache,
    inbox: RefCell<Vec<TextComponent>>,
}

impl PlayerSender {
    pub fn new(name: impl Into<String>, op: bool, permissions: PermissionsCache) -> Self {
        Self {
            name: name.into(),
            op,
            permissions,
            inbox: RefCell::new(Vec::new()),
        }
    }

    /// Plain text of every message received so far.
    pub fn messages(&self) -> Vec<String> {
        self.inbox
            .borrow()
            .iter()
            .map(TextComponent::plain_text)
            .collect()
    }

    pub fn take_messages(&self) -> Vec<TextComponent> {
        self.inbox.take()
    }
}

impl CommandSender for PlayerSender {
    fn name(&self) -> &str {
        &self.name
    }

    /// Operators hold every permission that is not explicitly denied.
    fn has_permission(&self, node: &str) -> bool {
        self.permissions.get_node_val(node).unwrap_or(self.op)
    }

    fn is_operator(&self) -> bool {
        self.op
    }

    fn send_message(&self, message: TextComponent) {
        self.inbox.borrow_mut().push(message);
    }
}
