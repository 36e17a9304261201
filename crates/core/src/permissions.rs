//! Per-user permission flags.
//!
//! Authorization is checked per route and per action. Admins implicitly hold
//! every permission.

use serde::{Deserialize, Serialize};

/// A single action a route may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    CreateContent,
    EditContent,
    DeleteContent,
    ManageUsers,
    Admin,
}

impl Permission {
    /// Dutch description used in 403 responses.
    pub const fn describe(self) -> &'static str {
        match self {
            Permission::CreateContent => "Je hebt geen rechten om inhoud aan te maken",
            Permission::EditContent => "Je hebt geen rechten om inhoud te bewerken",
            Permission::DeleteContent => "Je hebt geen rechten om inhoud te verwijderen",
            Permission::ManageUsers => "Je hebt geen rechten om gebruikers te beheren",
            Permission::Admin => "Beheerdersrechten vereist",
        }
    }
}

/// Permission flags stored on the user row and embedded in access tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub is_admin: bool,
    pub can_create_content: bool,
    pub can_edit_content: bool,
    pub can_delete_content: bool,
    pub can_manage_users: bool,
}

impl Permissions {
    /// Every flag set.
    pub const fn admin() -> Self {
        Self {
            is_admin: true,
            can_create_content: true,
            can_edit_content: true,
            can_delete_content: true,
            can_manage_users: true,
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        if self.is_admin {
            return true;
        }
        match permission {
            Permission::CreateContent => self.can_create_content,
            Permission::EditContent => self.can_edit_content,
            Permission::DeleteContent => self.can_delete_content,
            Permission::ManageUsers => self.can_manage_users,
            Permission::Admin => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_allows_everything() {
        let perms = Permissions {
            is_admin: true,
            ..Default::default()
        };
        assert!(perms.allows(Permission::DeleteContent));
        assert!(perms.allows(Permission::Admin));
    }

    #[test]
    fn editor_without_delete_flag() {
        let perms = Permissions {
            can_create_content: true,
            can_edit_content: true,
            ..Default::default()
        };
        assert!(perms.allows(Permission::EditContent));
        assert!(!perms.allows(Permission::DeleteContent));
        assert!(!perms.allows(Permission::Admin));
    }
}
