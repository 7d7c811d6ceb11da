//! Shopper session.
//!
//! This is a mock sign-in: there is no account database and no credential
//! check. Both login and signup always succeed and simply record who the
//! shopper says they are. Passwords are accepted so front ends keep the
//! usual form shape, but are never read, stored or logged.

use secrecy::SecretString;
use shophub_core::User;

/// Header label shown when nobody is signed in.
pub const SIGNED_OUT_LABEL: &str = "Sign In";

/// Header label shown for a signed-in shopper without a name.
pub const UNNAMED_LABEL: &str = "Account";

/// Signed-in identity, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStore {
    user: Option<User>,
}

impl SessionStore {
    /// Create a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session from a persisted user record.
    #[must_use]
    pub const fn from_user(user: Option<User>) -> Self {
        Self { user }
    }

    /// Sign in with an email address.
    ///
    /// The display name is the email's local part.
    pub fn login(&mut self, email: &str, _password: &SecretString) -> &User {
        self.user.insert(User::from_email(email))
    }

    /// Create an account with an explicit display name and sign in.
    pub fn signup(&mut self, email: &str, _password: &SecretString, name: &str) -> &User {
        self.user.insert(User {
            email: email.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Sign out, returning the user that was signed in.
    pub const fn logout(&mut self) -> Option<User> {
        self.user.take()
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Display name of the signed-in shopper, empty when signed out.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("", |u| u.name.as_str())
    }

    /// Text for the account button in the page header.
    #[must_use]
    pub fn header_label(&self) -> &str {
        match &self.user {
            None => SIGNED_OUT_LABEL,
            Some(user) if user.name.is_empty() => UNNAMED_LABEL,
            Some(user) => &user.name,
        }
    }
}
