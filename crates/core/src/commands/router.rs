//! Turns an incoming command line into a call to one registered handler.
//!
//! A [`RoutedCommand`] holds two tables. Argument routes match the first token
//! against a single [`ArgumentDescriptor`]. Command routes match it against a
//! [`CommandDescriptor`]'s own name and aliases or any of its nested
//! subcommands. Argument routes are always tried first. When nothing matches,
//! the lookup is repeated with the `default` token before giving up.

use super::{
    arguments::Arguments,
    context::ExecutionContext,
    descriptor::{Access, ArgumentDescriptor, CommandDescriptor},
    error::{CommandError, CommandResult, InternalError},
    host::{CommandExecutor, CommandSender, HostCommand},
    registrar::CommandRegistrar,
};
use crate::text::{ColorCode, TextComponent};
use itertools::Itertools;
use std::rc::Rc;
use tracing::{debug, error};

/// Token used to look up the fallback handler.
pub const DEFAULT_TOKEN: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Handled,
    /// The host should show the command's usage.
    NotHandled,
}

impl CommandOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, CommandOutcome::Handled)
    }
}

impl From<bool> for CommandOutcome {
    fn from(handled: bool) -> Self {
        if handled {
            CommandOutcome::Handled
        } else {
            CommandOutcome::NotHandled
        }
    }
}

pub type Handler = Box<dyn Fn(&mut ExecutionContext<'_>) -> CommandResult<CommandOutcome>>;

/// Fixed chat responses of the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub unknown_command: String,
    pub permission_denied: String,
    /// Handed to the host command object.
    pub permission_message: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            unknown_command: "Unknown command.".to_string(),
            permission_denied: "You do not have permission to use this command.".to_string(),
            permission_message: "§cYou do not have permission.".to_string(),
        }
    }
}

struct ArgumentRoute {
    descriptor: ArgumentDescriptor,
    handler: Handler,
}

struct CommandRoute {
    descriptor: CommandDescriptor,
    handler: Handler,
}

pub struct RoutedCommand {
    descriptor: CommandDescriptor,
    arguments: Vec<ArgumentRoute>,
    commands: Vec<CommandRoute>,
    messages: Messages,
}

pub struct RoutedCommandBuilder {
    descriptor: CommandDescriptor,
    arguments: Vec<ArgumentRoute>,
    commands: Vec<CommandRoute>,
    messages: Messages,
}

impl RoutedCommandBuilder {
    pub fn argument<F>(mut self, descriptor: ArgumentDescriptor, handler: F) -> Self
    where
        F: Fn(&mut ExecutionContext<'_>) -> CommandResult<CommandOutcome> + 'static,
    {
        self.arguments.push(ArgumentRoute {
            descriptor,
            handler: Box::new(handler),
        });
        self
    }

    pub fn command<F>(mut self, descriptor: CommandDescriptor, handler: F) -> Self
    where
        F: Fn(&mut ExecutionContext<'_>) -> CommandResult<CommandOutcome> + 'static,
    {
        self.commands.push(CommandRoute {
            descriptor,
            handler: Box::new(handler),
        });
        self
    }

    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn build(self) -> Result<Rc<RoutedCommand>, InternalError> {
        self.descriptor.validate()?;
        Ok(Rc::new(RoutedCommand {
            descriptor: self.descriptor,
            arguments: self.arguments,
            commands: self.commands,
            messages: self.messages,
        }))
    }

    /// Builds the command and queues its host object for the next flush.
    pub fn register(
        self,
        registrar: &mut CommandRegistrar,
    ) -> Result<Rc<HostCommand>, InternalError> {
        let routed = self.build()?;
        let host = Rc::new(RoutedCommand::to_host_command(&routed));
        registrar.enqueue(
            routed.descriptor.name(),
            routed.descriptor.permission(),
            routed.descriptor.is_admin(),
            Rc::clone(&host),
        );
        Ok(host)
    }
}

impl RoutedCommand {
    pub fn builder(descriptor: CommandDescriptor) -> RoutedCommandBuilder {
        RoutedCommandBuilder {
            descriptor,
            arguments: Vec::new(),
            commands: Vec::new(),
            messages: Messages::default(),
        }
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    pub fn to_host_command(this: &Rc<Self>) -> HostCommand {
        let name = this.descriptor.name();
        let executor: Rc<dyn CommandExecutor> = this.clone();
        HostCommand::new(name, executor)
            .with_usage(format!("/{name}"))
            .with_aliases(this.descriptor.aliases().to_vec())
            .with_permission(this.descriptor.permission())
            .with_permission_message(Some(this.messages.permission_message.clone()))
    }

    fn lookup(&self, sub: &str) -> Option<(Access<'_>, &Handler)> {
        if let Some(route) = self.arguments.iter().find(|r| r.descriptor.matches(sub)) {
            return Some((route.descriptor.access(), &route.handler));
        }
        self.commands
            .iter()
            .find(|r| r.descriptor.matches(sub))
            .map(|r| (r.descriptor.access_for(sub), &r.handler))
    }

    /// Finds the handler for the (already lowercased) first token, falling
    /// back to the `default` handler.
    pub fn resolve(&self, sub: Option<&str>) -> Option<(Access<'_>, &Handler)> {
        let sub = sub.unwrap_or(DEFAULT_TOKEN);
        self.lookup(sub).or_else(|| self.lookup(DEFAULT_TOKEN))
    }

    fn authorize(sender: &dyn CommandSender, access: Access<'_>) -> bool {
        if access.is_admin && !sender.is_operator() {
            return false;
        }
        if !access.permission.trim().is_empty() && !sender.has_permission(access.permission) {
            return false;
        }
        true
    }

    pub fn dispatch(
        &self,
        sender: &dyn CommandSender,
        command: &HostCommand,
        label: &str,
        arguments: Arguments,
    ) -> CommandOutcome {
        let sub = arguments.get(0).map(str::to_lowercase);

        let Some((access, handler)) = self.resolve(sub.as_deref()) else {
            sender.send_message(TextComponent::colored(
                &self.messages.unknown_command,
                ColorCode::Red,
            ));
            return CommandOutcome::Handled;
        };

        if !Self::authorize(sender, access) {
            debug!(
                "Denied /{} {} for {}",
                label,
                sub.as_deref().unwrap_or_default(),
                sender.name()
            );
            sender.send_message(TextComponent::colored(
                &self.messages.permission_denied,
                ColorCode::Red,
            ));
            return CommandOutcome::Handled;
        }

        let mut ctx = ExecutionContext::new(sender, command, label, arguments);
        match handler(&mut ctx) {
            Ok(outcome) => outcome,
            Err(CommandError::Runtime(err)) => {
                ctx.error(&err.to_string());
                CommandOutcome::Handled
            }
            Err(CommandError::Internal(err)) => {
                error!("/{} failed for {}: {}", label, sender.name(), err);
                CommandOutcome::NotHandled
            }
        }
    }

    /// Suggestions for the first token only.
    pub fn completions(&self, args: &[String]) -> Vec<String> {
        let [typed] = args else {
            return Vec::new();
        };
        let typed = typed.to_lowercase();

        self.arguments
            .iter()
            .flat_map(|route| route.descriptor.tokens())
            .chain(
                self.commands
                    .iter()
                    .flat_map(|route| route.descriptor.tokens()),
            )
            .filter(|token| *token != DEFAULT_TOKEN)
            .filter(|token| token.to_lowercase().starts_with(&typed))
            .unique()
            .map(str::to_string)
            .collect()
    }
}

impl CommandExecutor for RoutedCommand {
    fn on_command(
        &self,
        sender: &dyn CommandSender,
        command: &HostCommand,
        label: &str,
        args: &[String],
    ) -> bool {
        self.dispatch(sender, command, label, Arguments::from(args))
            .is_handled()
    }

    fn on_tab_complete(
        &self,
        _sender: &dyn CommandSender,
        _command: &HostCommand,
        _alias: &str,
        args: &[String],
    ) -> Vec<String> {
        self.completions(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::error::RuntimeError;
    use std::cell::RefCell;

    struct Sender {
        op: bool,
        permissions: Vec<&'static str>,
        messages: RefCell<Vec<String>>,
    }

    impl Sender {
        fn new(op: bool, permissions: Vec<&'static str>) -> Self {
            Self {
                op,
                permissions,
                messages: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandSender for Sender {
        fn name(&self) -> &str {
            "tester"
        }

        fn has_permission(&self, node: &str) -> bool {
            self.permissions.iter().any(|granted| *granted == node)
        }

        fn is_operator(&self) -> bool {
            self.op
        }

        fn send_message(&self, message: TextComponent) {
            self.messages.borrow_mut().push(message.plain_text());
        }
    }

    fn run(command: &Rc<RoutedCommand>, sender: &Sender, args: &[&str]) -> bool {
        let host = RoutedCommand::to_host_command(command);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        host.execute(sender, "pet", &args)
    }

    fn sample() -> Rc<RoutedCommand> {
        RoutedCommand::builder(CommandDescriptor::new("pet"))
            .argument(ArgumentDescriptor::new("spawn").alias("s"), |ctx| {
                ctx.reply("spawned");
                Ok(CommandOutcome::Handled)
            })
            .argument(ArgumentDescriptor::new("wipe").admin(), |ctx| {
                ctx.reply("wiped");
                Ok(CommandOutcome::Handled)
            })
            .command(
                CommandDescriptor::new("manage")
                    .require_permission("mcpets.manage")
                    .subcommand(ArgumentDescriptor::new("rename")),
                |ctx| {
                    ctx.reply(&format!("manage {}", ctx.args().get(0).unwrap_or_default()));
                    Ok(CommandOutcome::Handled)
                },
            )
            .command(CommandDescriptor::new("broken"), |_| {
                Err(CommandError::internal("boom"))
            })
            .command(CommandDescriptor::new("usage"), |_| {
                Err(RuntimeError::MissingArgument {
                    name: "pet".to_string(),
                }
                .into())
            })
            .command(CommandDescriptor::new("quiet"), |_| Ok(CommandOutcome::NotHandled))
            .build()
            .unwrap()
    }

    #[test]
    fn argument_routes_match_aliases_case_insensitively() {
        let command = sample();
        let sender = Sender::new(false, vec![]);
        assert!(run(&command, &sender, &["S"]));
        assert_eq!(*sender.messages.borrow(), ["spawned"]);
    }

    #[test]
    fn admin_requires_operator() {
        let command = sample();
        let player = Sender::new(false, vec![]);
        assert!(run(&command, &player, &["wipe"]));
        assert_eq!(
            *player.messages.borrow(),
            ["You do not have permission to use this command."]
        );

        let op = Sender::new(true, vec![]);
        run(&command, &op, &["wipe"]);
        assert_eq!(*op.messages.borrow(), ["wiped"]);
    }

    #[test]
    fn nested_subcommand_without_permission_skips_command_permission() {
        let command = sample();
        let sender = Sender::new(false, vec![]);
        run(&command, &sender, &["rename"]);
        assert_eq!(*sender.messages.borrow(), ["manage rename"]);

        let sender = Sender::new(false, vec![]);
        run(&command, &sender, &["manage"]);
        assert_eq!(
            *sender.messages.borrow(),
            ["You do not have permission to use this command."]
        );
    }

    #[test]
    fn unknown_without_default() {
        let command = sample();
        let sender = Sender::new(false, vec![]);
        assert!(run(&command, &sender, &["dance"]));
        assert!(run(&command, &sender, &[]));
        assert_eq!(
            *sender.messages.borrow(),
            ["Unknown command.", "Unknown command."]
        );
    }

    #[test]
    fn handler_errors_do_not_escape() {
        let command = sample();
        let sender = Sender::new(false, vec![]);
        assert!(!run(&command, &sender, &["broken"]));
        assert!(sender.messages.borrow().is_empty());

        assert!(run(&command, &sender, &["usage"]));
        assert_eq!(*sender.messages.borrow(), ["Missing argument: pet"]);

        assert!(!run(&command, &sender, &["quiet"]));
    }

    #[test]
    fn completions_only_for_first_token() {
        let command = sample();
        let typed = |args: &[&str]| {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            command.completions(&args)
        };
        assert_eq!(typed(&["MA"]), ["manage"]);
        assert_eq!(typed(&["s"]), ["spawn", "s"]);
        assert!(typed(&[]).is_empty());
        assert!(typed(&["manage", "r"]).is_empty());
    }

    #[test]
    fn blank_name_fails_to_build() {
        assert!(RoutedCommand::builder(CommandDescriptor::new("")).build().is_err());
    }
}
