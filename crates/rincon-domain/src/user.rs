//! Login users and their roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{RoleId, UserId};

/// Role names known to the storefront.
///
/// Wire format: upper-case Spanish names. Anything else is kept verbatim in
/// `Unknown` so a new server-side role survives a fetch-then-update cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleName {
    Admin,
    /// Store manager; must be approved by an admin before activation.
    Manager,
    #[default]
    Customer,
    Unknown(String),
}

impl RoleName {
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "ENCARGADO",
            Self::Customer => "CLIENTE",
            Self::Unknown(raw) => raw,
        }
    }

    /// May manage products and master data.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl From<String> for RoleName {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ADMIN" => Self::Admin,
            "ENCARGADO" => Self::Manager,
            "CLIENTE" => Self::Customer,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        match role {
            RoleName::Unknown(raw) => raw,
            known => known.as_wire().to_owned(),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleName {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "ENCARGADO" => Ok(Self::Manager),
            "CLIENTE" => Ok(Self::Customer),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "idRol", default)]
    pub id: RoleId,
    #[serde(rename = "nombreRol", default)]
    pub name: RoleName,
    #[serde(rename = "descripcionRol", default)]
    pub description: Option<String>,
}

impl Role {
    /// Role assigned to self-registered customers.
    pub fn customer() -> Self {
        Self {
            id: RoleId(3),
            name: RoleName::Customer,
            description: None,
        }
    }
}

/// A login account. The password travels in plain text both ways.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "idUsuario", default)]
    pub id: UserId,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "apellido", default)]
    pub surname: String,
    #[serde(rename = "correo", default)]
    pub email: String,
    #[serde(rename = "contrasena", default)]
    pub password: String,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub roles: Vec<Role>,
}

fn default_active() -> bool {
    true
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: UserId::default(),
            name: String::new(),
            surname: String::new(),
            email: String::new(),
            password: String::new(),
            active: true,
            roles: Vec::new(),
        }
    }
}

impl User {
    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    /// First listed role, or `CLIENTE` when the user has none.
    pub fn primary_role(&self) -> RoleName {
        self.roles
            .first()
            .map(|r| r.name.clone())
            .unwrap_or_default()
    }

    /// Inactive managers awaiting admin approval.
    pub fn is_pending_approval(&self) -> bool {
        !self.active && self.has_role(RoleName::Manager)
    }
}
