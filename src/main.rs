//! # Reservas Restaurante Server
//!
//! Servidor web de reservas de restaurante construido con Rust, Actix Web y MongoDB.
//!
//! ## Configuración
//!
//! El servidor se configura mediante variables de entorno (archivo `.env`):
//!
//! ```env
//! # Base de datos MongoDB (obligatoria)
//! MONGO_URL=mongodb://localhost:27017
//! MONGO_DATABASE=Reserva
//! MONGO_COLLECTION=reserva_restaurante
//!
//! # Servidor
//! BIND_ADDRESS=0.0.0.0:8000
//! STATIC_DIR=static
//! TEMPLATES_DIR=templates
//!
//! # Logging
//! RUST_LOG=debug,mongodb=info
//! ```
//!
//! ## Ejecución
//!
//! ```bash
//! # 1. Instalar y ejecutar MongoDB
//! # Docker: docker run -d --name mongo -p 27017:27017 mongo:latest
//!
//! # 2. Configurar variables de entorno
//! cp .env.example .env
//!
//! # 3. Compilar y ejecutar
//! cargo run
//!
//! # 4. Acceder al servidor
//! # http://localhost:8000
//! ```

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use reservas_restaurante::{api, db::MongoRepo, Config};
use std::time::Duration;

/// Espera máxima del ping de arranque; el driver reintenta hasta 30 s
const STARTUP_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Función principal que inicia el servidor web
///
/// 1. Carga variables de entorno desde `.env`
/// 2. Configura el sistema de logging con tracing
/// 3. Lee la configuración; sin `MONGO_URL` el proceso termina
/// 4. Crea el cliente de MongoDB y comprueba la conexión
/// 5. Sirve la API, la página de inicio y `/static`
/// 6. Al parar el servidor cierra el cliente de MongoDB
///
/// # Errores
///
/// Retorna `std::io::Error` si falta configuración, la cadena de conexión
/// es inválida o no se puede bindear la dirección.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Configurar sistema de logging con tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reservas_restaurante=debug".parse().unwrap())
                .add_directive("mongodb=info".parse().unwrap()),
        )
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    tracing::info!("Iniciando servidor de reservas con MongoDB...");

    let mongo_repo = MongoRepo::connect(&config).await.map_err(|e| {
        tracing::error!("Error conectando a MongoDB: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("Error de MongoDB: {}", e))
    })?;

    // El servidor arranca aunque MongoDB no responda todavía; /ping lo reporta
    match tokio::time::timeout(STARTUP_PING_TIMEOUT, mongo_repo.ping()).await {
        Ok(Ok(())) => tracing::info!("Conexión a MongoDB establecida exitosamente"),
        Ok(Err(e)) => tracing::warn!("MongoDB no responde al arrancar: {}", e),
        Err(_) => tracing::warn!(
            "MongoDB no respondió en {:?} al arrancar, se sigue sin esperar",
            STARTUP_PING_TIMEOUT
        ),
    }

    let bind_address = config.bind_address.clone();
    let static_dir = config.static_dir.clone();
    let repo_data = web::Data::new(mongo_repo.clone());
    let config_data = web::Data::new(config);

    tracing::info!("Servidor iniciando en {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(repo_data.clone())
            .app_data(config_data.clone())
            .wrap(Logger::default())
            .configure(api::init_routes)
            .service(Files::new("/static", &static_dir))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    mongo_repo.shutdown().await;
    Ok(())
}
