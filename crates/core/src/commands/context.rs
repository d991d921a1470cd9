use super::arguments::Arguments;
use super::host::{CommandSender, HostCommand};
use crate::text::{ColorCode, TextComponent};

pub struct ExecutionContext<'a> {
    sender: &'a dyn CommandSender,
    command: &'a HostCommand,
    label: &'a str,
    arguments: Arguments,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(
        sender: &'a dyn CommandSender,
        command: &'a HostCommand,
        label: &'a str,
        arguments: Arguments,
    ) -> Self {
        Self {
            sender,
            command,
            label,
            arguments,
        }
    }

    pub fn args(&self) -> &Arguments {
        &self.arguments
    }

    pub fn sender(&self) -> &dyn CommandSender {
        self.sender
    }

    pub fn command(&self) -> &HostCommand {
        self.command
    }

    /// The label the command was invoked with, which may be an alias.
    pub fn label(&self) -> &str {
        self.label
    }

    pub fn send(&self, component: TextComponent) {
        self.sender.send_message(component);
    }

    pub fn reply(&self, message: &str) {
        self.send(TextComponent::colored(message, ColorCode::Yellow));
    }

    pub fn error(&self, message: &str) {
        self.send(TextComponent::colored(message, ColorCode::Red));
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.sender.has_permission(permission)
    }

    pub fn is_operator(&self) -> bool {
        self.sender.is_operator()
    }
}
