/// Trait for loading configuration from prefixed environment variables.
///
/// Implementors derive `serde::Deserialize` (with `#[serde(default)]` for
/// optional settings) and call `Config::from_env()` at startup. Field
/// `base_url` under prefix `RINCON_` reads `RINCON_BASE_URL`.
pub trait Config: Sized + serde::de::DeserializeOwned {
    const PREFIX: &'static str;

    fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(Self::PREFIX).from_env()
    }

    /// Load from an explicit list of `(key, value)` pairs instead of the
    /// process environment.
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(Self::PREFIX).from_iter(vars)
    }
}
