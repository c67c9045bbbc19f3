//! Simulated sign-in and registration.
//!
//! There is no backend: these only check the form and build the [`User`]
//! the client then hands to `Store::set_user`.

use crate::error::{Result, StoreError};
use crate::types::User;
use chrono::Utc;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fixed id given to users who sign in.
const SIGNED_IN_USER_ID: &str = "1";

/// Registration form fields.
#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign in with email and password. Any non-empty pair is accepted.
pub fn login(email: &str, password: &str) -> Result<User> {
    if email.is_empty() || password.is_empty() {
        return Err(StoreError::MissingCredentials);
    }

    let name = email.split('@').next().unwrap_or(email).to_string();
    tracing::debug!(email, "simulated sign-in");

    Ok(User {
        id: SIGNED_IN_USER_ID.to_string(),
        email: email.to_string(),
        name: Some(name),
        avatar: None,
        is_authenticated: true,
    })
}

/// Create an account from a registration form.
pub fn register(form: &RegistrationForm) -> Result<User> {
    if form.name.is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(StoreError::MissingCredentials);
    }
    if form.password != form.confirm_password {
        return Err(StoreError::PasswordMismatch);
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(StoreError::PasswordTooShort(MIN_PASSWORD_LEN));
    }

    tracing::debug!(email = %form.email, "simulated registration");

    Ok(User {
        id: Utc::now().timestamp_millis().to_string(),
        email: form.email.clone(),
        name: Some(form.name.clone()),
        avatar: None,
        is_authenticated: true,
    })
}
