//! Values derived from the sequential row index or post ordinal.

/// `User_<index>`
pub fn user_name(index: u64) -> String {
    format!("User_{index}")
}

/// `user_<index>@example.com`
pub fn user_email(index: u64) -> String {
    format!("user_{index}@example.com")
}

/// `Post_<ordinal>`
pub fn post_name(ordinal: usize) -> String {
    format!("Post_{ordinal}")
}

/// `Description for post <ordinal>`
pub fn post_description(ordinal: usize) -> String {
    format!("Description for post {ordinal}")
}
