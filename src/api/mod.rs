//! # Módulo API
//!
//! Este módulo contiene todas las rutas y controladores de la API REST.
//!
//! ## Módulos principales
//!
//! - [`reservation`] - CRUD de reservas
//! - [`schemas`] - Esquemas de entrada/salida y sus validaciones
//! - [`health`] - Comprobación de la conexión a MongoDB
//! - [`landing`] - Página de inicio
//! - [`errors`] - Manejo de errores de la aplicación

pub mod errors;
pub mod health;
pub mod landing;
pub mod reservation;
pub mod schemas;
mod middleware;

// Re-exportar tipos comunes para facilitar su uso
pub use errors::{AppError, AppResult, DetalleCampo, ErrorResponse};

use actix_web::web;

/// Configura todas las rutas de la API
///
/// ## Rutas configuradas
///
/// - `/` - Ver [`landing::routes`]
/// - `/ping` - Ver [`health::routes`]
/// - `/reservas/*` - Ver [`reservation::routes`]
///
/// Los handlers esperan `web::Data<MongoRepo>` y `web::Data<Config>` en la
/// aplicación.
///
/// # Ejemplo
///
/// ```no_run
/// use actix_web::{web, App};
/// use reservas_restaurante::api;
///
/// let app = App::new()
///     .configure(api::init_routes);
/// ```
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    landing::routes(cfg);
    health::routes(cfg);
    reservation::routes(cfg);
}
