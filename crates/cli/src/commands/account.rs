//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! shophub account login -e sam@example.com -p anything
//! shophub account signup -e sam@example.com -p anything -n "Sam Taylor"
//! shophub account whoami
//! shophub account logout
//! ```
//!
//! Sign in is a mock: every email and password is accepted.

use std::io::Write;

use secrecy::SecretString;
use shophub_storefront::state::ShopState;
use shophub_storefront::storage::KeyValueStore;

use super::{CliError, with_events};
use crate::render;

/// Sign in; the display name is the email's local part.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn login<S: KeyValueStore>(
    state: &mut ShopState<S>,
    email: &str,
    password: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let password = SecretString::from(password);
    let user = state.login(email, &password);
    writeln!(out, "Welcome back, {}!", user.name)?;
    Ok(())
}

/// Sign up with a display name and sign in.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn signup<S: KeyValueStore>(
    state: &mut ShopState<S>,
    email: &str,
    password: String,
    name: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let password = SecretString::from(password);
    let user = state.signup(email, &password, name);
    writeln!(out, "Welcome, {}!", user.name)?;
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn logout<S: KeyValueStore>(
    state: &mut ShopState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (was_signed_in, events) = with_events(state, ShopState::logout);
    if was_signed_in {
        render::toasts(out, &events)?;
    } else {
        writeln!(out, "You are not signed in")?;
    }
    Ok(())
}

/// Show the header: account label and cart badge, plus the email when
/// signed in.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn whoami<S: KeyValueStore>(
    state: &ShopState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    render::header(out, state.session(), state.cart())?;
    if let Some(user) = state.session().user() {
        writeln!(out, "Signed in as {}", user.email)?;
    }
    Ok(())
}
