//! Record types produced by the generator.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Account state of a generated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserState {
    Active,
    Inactive,
    Pending,
}

impl UserState {
    /// Every state, in the order the generator samples from.
    pub const ALL: [UserState; 3] = [UserState::Active, UserState::Inactive, UserState::Pending];

    /// The value stored in the `state` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserState::Active => "active",
            UserState::Inactive => "inactive",
            UserState::Pending => "pending",
        }
    }
}

impl std::fmt::Display for UserState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    /// Sequential row index the name and email were derived from.
    pub index: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub state: UserState,
}

/// A row of the `posts` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub number_of_likes: i32,
}

impl PostRecord {
    /// ISO-8601 rendering of `date` with millisecond precision and a `Z` suffix.
    pub fn iso_date(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
