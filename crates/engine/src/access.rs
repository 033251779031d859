//! Role registry: one fixed administrator plus a revocable editor set.

use alloy_primitives::Address;
use std::collections::BTreeSet;
use tracing::warn;

use secoracle_core::{OracleError, Result, Role};

/// Tracks the administrator and the editor set, and authorizes callers.
///
/// The administrator is fixed at construction and cannot be transferred. All checks are pure
/// reads of the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControlRegistry {
    admin: Address,
    editors: BTreeSet<Address>,
}

impl AccessControlRegistry {
    /// Create a registry administered by `admin`.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidAdministrator` if `admin` is the zero address.
    pub fn new(admin: Address) -> Result<Self> {
        if admin.is_zero() {
            return Err(OracleError::InvalidAdministrator);
        }
        Ok(Self {
            admin,
            editors: BTreeSet::new(),
        })
    }

    /// The administrator.
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Whether `identity` is the administrator.
    pub fn is_admin(&self, identity: Address) -> bool {
        identity == self.admin
    }

    /// Whether `identity` is in the editor set.
    ///
    /// The administrator is not reported as an editor unless explicitly granted.
    pub fn is_editor(&self, identity: Address) -> bool {
        self.editors.contains(&identity)
    }

    /// Current editors in ascending address order.
    pub fn editors(&self) -> impl Iterator<Item = Address> + '_ {
        self.editors.iter().copied()
    }

    /// Add `identity` to the editor set.
    ///
    /// Returns `true` if membership changed; granting an existing editor is a no-op.
    pub fn grant_editor(&mut self, caller: Address, identity: Address) -> Result<bool> {
        self.authorize_admin_only(caller)?;
        if identity.is_zero() {
            return Err(OracleError::InvalidIdentity);
        }
        Ok(self.editors.insert(identity))
    }

    /// Remove `identity` from the editor set.
    ///
    /// Returns `true` if membership changed; revoking a non-editor is a no-op.
    pub fn revoke_editor(&mut self, caller: Address, identity: Address) -> Result<bool> {
        self.authorize_admin_only(caller)?;
        Ok(self.editors.remove(&identity))
    }

    /// Fail unless `caller` is the administrator.
    pub fn authorize_admin_only(&self, caller: Address) -> Result<()> {
        if self.is_admin(caller) {
            return Ok(());
        }
        warn!(%caller, "rejected caller without admin role");
        Err(OracleError::Unauthorized {
            caller,
            required: Role::Admin,
        })
    }

    /// Fail unless `caller` is the administrator or a current editor.
    pub fn authorize_editor_or_admin(&self, caller: Address) -> Result<()> {
        if self.is_admin(caller) || self.is_editor(caller) {
            return Ok(());
        }
        warn!(%caller, "rejected caller without editor role");
        Err(OracleError::Unauthorized {
            caller,
            required: Role::Editor,
        })
    }
}
