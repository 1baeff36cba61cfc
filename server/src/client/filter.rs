use crate::models::User;

/// Case-insensitive substring match of `term` against name, email and role.
/// A blank term matches everyone.
pub fn matches_search(user: &User, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [user.name.as_str(), user.email.as_str(), user.role.as_str()]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    users.iter().filter(|u| matches_search(u, term)).collect()
}
