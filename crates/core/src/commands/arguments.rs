use super::error::{CommandResult, RuntimeError};

/// The raw tokens following the command label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    args: Vec<String>,
}

impl Arguments {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Like [`Arguments::get`], but a missing token becomes a user-facing error.
    pub fn require(&self, index: usize, name: &str) -> CommandResult<&str> {
        self.get(index).ok_or_else(|| {
            RuntimeError::MissingArgument {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

impl From<&[String]> for Arguments {
    fn from(args: &[String]) -> Self {
        Self::new(args.to_vec())
    }
}

impl From<Vec<&str>> for Arguments {
    fn from(args: Vec<&str>) -> Self {
        Self::new(args.into_iter().map(str::to_string).collect())
    }
}
