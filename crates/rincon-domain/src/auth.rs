use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(rename = "nombreUsuario", default)]
    pub user_name: Option<String>,
    #[serde(rename = "autenticado", default)]
    pub authenticated: bool,
    /// Issued by the backend but never attached to later requests.
    #[serde(default)]
    pub token: Option<String>,
}
