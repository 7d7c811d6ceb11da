//! Signed-in user record.

use serde::{Deserialize, Serialize};

/// Identity held by a signed-in session.
///
/// Stored as-is under the `user` key. There is no password or token: the
/// presence of this record is what makes a session "logged in".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

impl User {
    /// Build the record for an email-only sign in.
    ///
    /// The display name is everything before the first `@`, or the whole
    /// input when there is none.
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        Self {
            email: email.to_owned(),
            name: email.split('@').next().unwrap_or_default().to_owned(),
        }
    }
}
