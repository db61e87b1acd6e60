//! Permission gate consulted before any mutation.

use std::collections::HashSet;

/// Scope required to add, delete or update ledger records.
pub const WRITE_SCOPE: &str = "financeiro:escrever";

pub trait PermissionGate: Send + Sync {
    fn has_permission(&self, scope: &str) -> bool;
}

impl<F> PermissionGate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn has_permission(&self, scope: &str) -> bool {
        self(scope)
    }
}

/// Membership role of the current user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Owner,
    Editor,
    Viewer,
}

impl Role {
    pub fn can_write(self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }
}

impl PermissionGate for Role {
    fn has_permission(&self, scope: &str) -> bool {
        scope == WRITE_SCOPE && self.can_write()
    }
}

/// A fixed set of granted scopes.
#[derive(Clone, Debug, Default)]
pub struct StaticPermissions {
    granted: HashSet<String>,
}

impl StaticPermissions {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: scopes.into_iter().map(Into::into).collect(),
        }
    }
}

impl PermissionGate for StaticPermissions {
    fn has_permission(&self, scope: &str) -> bool {
        self.granted.contains(scope)
    }
}
