use actix_web::{get, web, HttpResponse, Responder};
use super::AppResult;
use crate::db::MongoRepo;

/// Verifica la conexión a MongoDB con un `ping`
///
/// # Respuesta
/// ```json
/// { "message": "Conexión exitosa a MongoDB!" }
/// ```
///
/// # Errores
/// - `500 Internal Server Error`: MongoDB no responde
#[get("/ping")]
async fn ping(repo: web::Data<MongoRepo>) -> AppResult<impl Responder> {
    repo.ping().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Conexión exitosa a MongoDB!" })))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(ping);
}
