use super::error::InternalError;

/// Permission requirements of a matched handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access<'a> {
    pub permission: &'a str,
    pub is_admin: bool,
}

fn token_matches(token: &str, sub: &str) -> bool {
    token.to_lowercase() == sub
}

/// Describes a single subcommand token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub(super) token: String,
    pub(super) aliases: Vec<String>,
    pub(super) permission: String,
    pub(super) is_admin: bool,
}

impl ArgumentDescriptor {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn require_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// `sub` must already be lowercase.
    pub fn matches(&self, sub: &str) -> bool {
        token_matches(&self.token, sub) || self.aliases.iter().any(|alias| token_matches(alias, sub))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.token.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn access(&self) -> Access<'_> {
        Access {
            permission: &self.permission,
            is_admin: self.is_admin,
        }
    }
}

/// Describes a command: its own name and aliases plus nested subcommand tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub(super) name: String,
    pub(super) permission: String,
    pub(super) is_admin: bool,
    pub(super) aliases: Vec<String>,
    pub(super) subcommands: Vec<ArgumentDescriptor>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn require_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn subcommand(mut self, argument: ArgumentDescriptor) -> Self {
        self.subcommands.push(argument);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn permission(&self) -> &str {
        &self.permission
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn subcommands(&self) -> &[ArgumentDescriptor] {
        &self.subcommands
    }

    pub(super) fn validate(&self) -> Result<(), InternalError> {
        if self.name.trim().is_empty() {
            return Err(InternalError::BlankCommandName);
        }
        Ok(())
    }

    pub fn matches_self(&self, sub: &str) -> bool {
        token_matches(&self.name, sub) || self.aliases.iter().any(|alias| token_matches(alias, sub))
    }

    pub fn find_subcommand(&self, sub: &str) -> Option<&ArgumentDescriptor> {
        self.subcommands.iter().find(|arg| arg.matches(sub))
    }

    pub fn matches(&self, sub: &str) -> bool {
        self.matches_self(sub) || self.find_subcommand(sub).is_some()
    }

    /// Every token this command answers to, nested ones included.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .chain(self.subcommands.iter().flat_map(ArgumentDescriptor::tokens))
    }

    /// The nested subcommand's requirements win over the command's own.
    pub fn access_for(&self, sub: &str) -> Access<'_> {
        match self.find_subcommand(sub) {
            Some(arg) => arg.access(),
            None => Access {
                permission: &self.permission,
                is_admin: self.is_admin,
            },
        }
    }
}
