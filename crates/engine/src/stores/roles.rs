//! Connection role registry.

use dashmap::DashMap;
use uuid::Uuid;

use skirmish_domain::Role;

/// Maps each connection to the role it registered with.
///
/// Unregistered connections are players. Entries are populated on
/// `register-mode` and dropped on disconnect.
#[derive(Default)]
pub struct RoleRegistry {
    roles: DashMap<Uuid, Role>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a role, replacing any earlier one.
    pub fn set_role(&self, connection_id: Uuid, role: Role) {
        tracing::info!(connection_id = %connection_id, %role, "Role registered");
        self.roles.insert(connection_id, role);
    }

    pub fn get_role(&self, connection_id: Uuid) -> Role {
        self.roles
            .get(&connection_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn remove(&self, connection_id: Uuid) {
        self.roles.remove(&connection_id);
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
