//! User display formatting

use crate::models::PublicUser;

/// Format users as a table
pub fn format_user_list(users: &[PublicUser]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:16} {:24} {:6} {}\n",
        "ID", "Username", "Name", "Role", "Created"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for user in users {
        output.push_str(&format!(
            "{:12} {:16} {:24} {:6} {}\n",
            user.id.to_string(),
            super::truncate(&user.username, 16),
            super::truncate(&user.name, 24),
            user.role.as_str().to_uppercase(),
            user.created_at.format("%Y-%m-%d")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserId};
    use chrono::Utc;

    #[test]
    fn test_format_users() {
        let users = vec![PublicUser {
            id: UserId::new(),
            name: "Administrator".into(),
            username: "admin".into(),
            role: Role::Admin,
            created_at: Utc::now(),
        }];

        let output = format_user_list(&users);
        assert!(output.contains("admin"));
        assert!(output.contains("ADMIN"));
        assert!(!output.contains("argon2"));
    }
}
