//! # Configuración del servidor
//!
//! Toda la configuración se lee de variables de entorno (o de un archivo
//! `.env` cargado con `dotenvy` antes de llamar a [`Config::from_env`]).
//!
//! ```env
//! MONGO_URL=mongodb://localhost:27017
//! MONGO_DATABASE=Reserva
//! MONGO_COLLECTION=reserva_restaurante
//! BIND_ADDRESS=0.0.0.0:8000
//! STATIC_DIR=static
//! TEMPLATES_DIR=templates
//! ```

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATABASE: &str = "Reserva";
pub const DEFAULT_COLLECTION: &str = "reserva_restaurante";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Errores al cargar la configuración
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Falta una variable obligatoria (o está vacía)
    #[error("La variable de entorno {0} no está configurada.")]
    Missing(&'static str),
}

/// Configuración del servidor de reservas
#[derive(Debug, Clone)]
pub struct Config {
    /// Cadena de conexión a MongoDB (`MONGO_URL`, obligatoria)
    pub mongo_url: String,
    /// Base de datos donde vive la colección de reservas
    pub mongo_database: String,
    /// Colección de reservas
    pub mongo_collection: String,
    /// Dirección y puerto del servidor HTTP
    pub bind_address: String,
    /// Carpeta servida bajo `/static`
    pub static_dir: PathBuf,
    /// Carpeta que contiene `index.html`
    pub templates_dir: PathBuf,
}

impl Config {
    /// Carga la configuración desde el entorno del proceso
    ///
    /// # Errores
    /// - `ConfigError::Missing("MONGO_URL")` si la cadena de conexión no existe
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Carga la configuración a partir de una función de búsqueda arbitraria.
    ///
    /// Los valores vacíos se tratan como ausentes.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mongo_url = get("MONGO_URL").ok_or(ConfigError::Missing("MONGO_URL"))?;

        Ok(Config {
            mongo_url,
            mongo_database: get("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            mongo_collection: get("MONGO_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()).into(),
            templates_dir: get("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string()).into(),
        })
    }

    /// Ruta completa de la página de inicio
    pub fn index_path(&self) -> PathBuf {
        self.templates_dir.join("index.html")
    }
}
