//! Identity gate.
//!
//! Validates signup and login input, checks credentials against the user
//! store and hands the result back to the UI layer. Session persistence
//! lives in [`crate::session`].

use std::sync::LazyLock;

use regex_lite::Regex;
use validator::{Validate, ValidateArgs, ValidationError};

use crate::config::PasswordPolicy;
use crate::error::{CoreError, Result};
use crate::user::{Role, User, UserRepository};

static CNIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-\d{7}-\d$").unwrap());
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[a-zA-Z]{2,7}$").unwrap()
});
static USER_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+\.user@(gmail|yahoo|hotmail)\.com$")
        .unwrap()
});
static TECH_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+\.tech@(gmail|yahoo|hotmail)\.com$")
        .unwrap()
});

/// Signup form data.
#[derive(Debug, Validate)]
#[validate(context = PasswordPolicy)]
pub struct Signup {
    #[validate(length(min = 1, message = "Name must not be empty."))]
    pub name: String,
    pub email: String,
    #[validate(custom(
        function = "validate_password",
        message = "Password does not match the required length.",
        use_context
    ))]
    pub password: String,
    #[validate(custom(
        function = "validate_cnic",
        message = "CNIC must be formatted as 00000-0000000-0."
    ))]
    pub cnic: Option<String>,
    pub role: Option<Role>,
}

/// Login form data.
#[derive(Debug, Validate)]
#[validate(context = PasswordPolicy)]
pub struct Credentials {
    pub email: String,
    #[validate(custom(
        function = "validate_password",
        message = "Password does not match the required length.",
        use_context
    ))]
    pub password: String,
    #[validate(custom(
        function = "validate_cnic",
        message = "CNIC must be formatted as 00000-0000000-0."
    ))]
    pub cnic: Option<String>,
    pub role: Option<Role>,
}

fn validate_password(
    password: &str,
    policy: &PasswordPolicy,
) -> std::result::Result<(), ValidationError> {
    if let Some(required) = policy.exact_length {
        if password.chars().count() != required {
            return Err(ValidationError::new("password_length"));
        }
    }
    Ok(())
}

fn validate_cnic(cnic: &str) -> std::result::Result<(), ValidationError> {
    if CNIC.is_match(cnic) {
        Ok(())
    } else {
        Err(ValidationError::new("cnic_format"))
    }
}

/// Role-scoped email check: technicians sign up with `*.tech@` addresses,
/// plain users with `*.user@`, both at one of the known providers.
/// Role-less deployments only require a plausible email shape.
fn check_email(email: &str, role: Option<Role>) -> Result<()> {
    let valid = match role {
        Some(Role::User) => USER_EMAIL.is_match(email),
        Some(Role::Technician) => TECH_EMAIL.is_match(email),
        None => EMAIL.is_match(email),
    };

    if valid { Ok(()) } else { Err(CoreError::WrongEmail) }
}

/// Identity gate over the user store.
#[derive(Clone, Copy, Debug)]
pub struct Gate {
    policy: PasswordPolicy,
}

impl Gate {
    /// Create a new [`Gate`] applying `policy`.
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Register a new account.
    ///
    /// Validates formats first; an already-registered email is rejected by
    /// the store. Nothing changes on failure.
    pub fn signup(
        &self,
        users: &mut UserRepository,
        form: Signup,
    ) -> Result<User> {
        form.validate_with_args(&self.policy)?;
        check_email(&form.email, form.role)?;

        let user = User {
            name: form.name,
            email: form.email,
            password: form.password,
            cnic: form.cnic,
            role: form.role,
        };
        users.add(user.clone())?;

        tracing::info!(email = %user.email, "account created");
        Ok(user)
    }

    /// Authenticate against stored accounts.
    ///
    /// Every provided field must match the stored record exactly (email
    /// case-insensitively). Any failure, a malformed field included, is
    /// reported as the undifferentiated [`CoreError::InvalidCredentials`];
    /// the caller never learns which field was wrong.
    pub fn login(
        &self,
        users: &UserRepository,
        credentials: &Credentials,
    ) -> Result<User> {
        if credentials.validate_with_args(&self.policy).is_err()
            || check_email(&credentials.email, credentials.role).is_err()
        {
            return Err(CoreError::InvalidCredentials);
        }

        users
            .find_by_email(&credentials.email)
            .filter(|user| user.password == credentials.password)
            .filter(|user| {
                credentials
                    .cnic
                    .as_deref()
                    .is_none_or(|cnic| user.cnic.as_deref() == Some(cnic))
            })
            .filter(|user| {
                credentials
                    .role
                    .is_none_or(|role| user.role == Some(role))
            })
            .cloned()
            .ok_or(CoreError::InvalidCredentials)
    }
}
