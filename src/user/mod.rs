mod repository;

pub use repository::*;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::store::Record;

/// Account role, split between plain users and technicians.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Role {
    #[default]
    User,
    Technician,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Technician => write!(f, "Technician"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("user") {
            Ok(Role::User)
        } else if s.eq_ignore_ascii_case("technician") {
            Ok(Role::Technician)
        } else {
            Err(CoreError::Parse {
                what: "role",
                value: s.to_owned(),
            })
        }
    }
}

/// Account as saved on the users file.
///
/// Email is the natural key, compared case-insensitively. Accounts are
/// created at signup and never updated or deleted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    /// National identity number, only collected by role-aware deployments.
    pub cnic: Option<String>,
    pub role: Option<Role>,
}

impl Record for User {
    const FIELDS: usize = 5;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.password.clone(),
            self.cnic.clone().unwrap_or_default(),
            self.role.map(|role| role.to_string()).unwrap_or_default(),
        ]
    }

    fn from_fields(fields: &[String]) -> Result<Self> {
        let cnic = (!fields[3].is_empty()).then(|| fields[3].clone());
        let role = if fields[4].is_empty() {
            None
        } else {
            Some(fields[4].parse()?)
        };

        Ok(Self {
            name: fields[0].clone(),
            email: fields[1].clone(),
            password: fields[2].clone(),
            cnic,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels_round_trip() {
        for role in [Role::User, Role::Technician] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_optional_fields_round_trip() {
        let bare = User {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "Passw0rd".into(),
            cnic: None,
            role: None,
        };
        let fields = bare.to_fields();
        assert_eq!(User::from_fields(&fields).unwrap(), bare);

        let full = User {
            cnic: Some("12345-1234567-1".into()),
            role: Some(Role::Technician),
            ..bare
        };
        let fields = full.to_fields();
        assert_eq!(User::from_fields(&fields).unwrap(), full);
    }
}
