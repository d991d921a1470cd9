mod arguments;
pub mod builtin;
mod context;
mod descriptor;
mod error;
mod host;
mod registrar;
mod router;

pub use arguments::Arguments;
pub use context::ExecutionContext;
pub use descriptor::{Access, ArgumentDescriptor, CommandDescriptor};
pub use error::{CommandError, CommandResult, InternalError, RuntimeError};
pub use host::{CommandExecutor, CommandMap, CommandMapProvider, CommandSender, HostCommand};
pub use registrar::{CommandRegistrar, RegistrarError};
pub use router::{
    CommandOutcome, DEFAULT_TOKEN, Handler, Messages, RoutedCommand, RoutedCommandBuilder,
};
