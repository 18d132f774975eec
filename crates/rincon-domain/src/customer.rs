//! Customer profiles, linked one-to-one with a login [`User`].

use serde::{Deserialize, Serialize};

use crate::id::CustomerId;
use crate::user::User;

/// Reference to a customer by key (`{"id": n}` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: CustomerId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: CustomerId,
    #[serde(rename = "usuario", default)]
    pub user: Option<User>,
    #[serde(default)]
    pub rut: String,
    #[serde(rename = "primerNombre", default)]
    pub first_name: String,
    #[serde(rename = "segundoNombre", default)]
    pub second_name: Option<String>,
    #[serde(rename = "primerApellido", default)]
    pub first_surname: String,
    #[serde(rename = "segundoApellido", default)]
    pub second_surname: Option<String>,
    /// ISO `YYYY-MM-DD`.
    #[serde(rename = "fechaNacimiento", default)]
    pub birth_date: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "comuna", default)]
    pub commune: String,
    #[serde(default)]
    pub region: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "fechaCreacion", default)]
    pub created_at: Option<String>,
}

impl Customer {
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.second_name.as_deref(),
            Some(self.first_surname.as_str()),
            self.second_surname.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Body of `POST /api/clientes` and `PUT /api/clientes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRequest {
    #[serde(rename = "usuario")]
    pub user: User,
    pub rut: String,
    #[serde(rename = "primerNombre")]
    pub first_name: String,
    #[serde(rename = "segundoNombre")]
    pub second_name: Option<String>,
    #[serde(rename = "primerApellido")]
    pub first_surname: String,
    #[serde(rename = "segundoApellido")]
    pub second_surname: Option<String>,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "comuna")]
    pub commune: String,
    pub region: String,
    #[serde(rename = "telefono")]
    pub phone: String,
}
