use actix_files::NamedFile;
use actix_web::{get, web};
use super::{AppError, AppResult};
use crate::config::Config;

/// Página de inicio: `index.html` de la carpeta de plantillas, tal cual
#[get("/")]
async fn index(config: web::Data<Config>) -> AppResult<NamedFile> {
    let path = config.index_path();
    NamedFile::open_async(&path)
        .await
        .map_err(|e| AppError::Internal(format!("No se pudo leer {}: {}", path.display(), e)))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}
