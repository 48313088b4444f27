#![allow(dead_code)]

use reservas_restaurante::Config;
use serde_json::{json, Value};

/// MongoDB inalcanzable con timeouts cortos: sirve para probar todo lo que
/// falla antes de llegar a la base de datos o justo al llegar.
pub const OFFLINE_MONGO_URL: &str =
    "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300&connectTimeoutMS=300";

pub fn config(mongo_url: &str, collection: &str) -> Config {
    Config {
        mongo_url: mongo_url.to_string(),
        mongo_database: "reservas_test".to_string(),
        mongo_collection: collection.to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        static_dir: "static".into(),
        templates_dir: "templates".into(),
    }
}

pub fn offline_config() -> Config {
    config(OFFLINE_MONGO_URL, "reserva_restaurante")
}

pub fn valid_body() -> Value {
    json!({
        "nombre_cliente": "Maria Gomez",
        "fecha_reserva": "2024-12-25T20:00:00Z",
        "numero_personas": 4,
        "telefono": "6001234567",
        "email": "maria@example.com"
    })
}

pub fn body_with(field: &str, value: Value) -> Value {
    let mut body = valid_body();
    body[field] = value;
    body
}

/// Construye la app de pruebas con el repo y la configuración dados
#[macro_export]
macro_rules! init_app {
    ($repo:expr, $config:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($repo))
                .app_data(actix_web::web::Data::new($config))
                .configure(reservas_restaurante::api::init_routes),
        )
        .await
    };
}
