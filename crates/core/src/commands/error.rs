use thiserror::Error;

/// Errors reported back to whoever ran the command.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Missing argument: {name}")]
    MissingArgument { name: String },
    #[error("Invalid {name}: {value}")]
    InvalidArgument { name: String, value: String },
    #[error("{0}")]
    Message(String),
}

/// Bugs in command wiring; logged, never shown to the sender.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Internal error: command name must not be blank")]
    BlankCommandName,
    #[error("Internal error: failed to reload pet keys: {message}")]
    Reload { message: String },
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CommandError {
    pub fn runtime(message: impl Into<String>) -> Self {
        CommandError::Runtime(RuntimeError::Message(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::Internal(InternalError::Message {
            message: message.into(),
        })
    }
}

pub type CommandResult<T> = Result<T, CommandError>;
