//! # API de Reservas
//!
//! CRUD sobre la colección de reservas. Cada handler hace una sola llamada
//! a MongoDB:
//! - Crear una reserva
//! - Listar reservas con búsqueda opcional
//! - Obtener, actualizar y eliminar una reserva por ID

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use super::middleware::ErrorLogExt;
use super::schemas::{parse_body, ListQuery, NuevaReserva, ReservaResponse, ReservaUpdate, LIST_LIMIT};
use super::{AppError, AppResult};
use crate::db::{MongoRepo, Reserva};

/// Convierte el ID de la ruta en ObjectId
///
/// # Errores
/// - `InvalidId` (400) si no son 24 caracteres hexadecimales
fn parse_reserva_id(id: &str) -> AppResult<ObjectId> {
    Ok(ObjectId::parse_str(id)?)
}

/// Crea una nueva reserva
///
/// # Respuesta
/// `201 Created` con la reserva guardada, incluido su `id`.
///
/// # Errores
/// - `422 Unprocessable Entity`: cuerpo inválido (`detalle` + `cuerpo`)
/// - `500 Internal Server Error`: error de base de datos
#[post("/reservas/")]
async fn create_reserva(repo: web::Data<MongoRepo>, body: web::Bytes) -> AppResult<impl Responder> {
    let nueva: NuevaReserva = parse_body(&body)?;
    tracing::debug!(nombre_cliente = %nueva.nombre_cliente, "Intentando crear una nueva reserva");

    let mut reserva = Reserva::from(nueva);
    let result = repo
        .reservas()
        .insert_one(&reserva)
        .await
        .log_error_context("insertando reserva")
        .map_err(|e| AppError::database("Error interno al guardar la reserva", e))?;

    let id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Internal("MongoDB devolvió un _id que no es ObjectId".to_string()))?;
    reserva.id = Some(id);

    tracing::info!(id = %id.to_hex(), "Reserva creada");
    Ok(HttpResponse::Created().json(ReservaResponse::try_from(reserva)?))
}

/// Lista reservas, como mucho [`LIST_LIMIT`]
///
/// Con `?search=texto` filtra por nombre, teléfono o email (subcadena, sin
/// distinguir mayúsculas).
///
/// # Errores
/// - `500 Internal Server Error`: error de base de datos
#[get("/reservas/")]
async fn list_reservas(
    repo: web::Data<MongoRepo>,
    query: web::Query<ListQuery>,
) -> AppResult<impl Responder> {
    let filter = query.to_filter();
    tracing::debug!(search = ?query.search, "Intentando listar reservas");

    let mut cursor = repo
        .reservas()
        .find(filter)
        .limit(LIST_LIMIT)
        .await
        .log_error_context("listando reservas")
        .map_err(|e| AppError::database("Error al listar reservas", e))?;

    let mut results = Vec::new();
    while cursor
        .advance()
        .await
        .log_error_context("recorriendo cursor de reservas")
        .map_err(|e| AppError::database("Error al listar reservas", e))?
    {
        let reserva = cursor
            .deserialize_current()
            .log_error_context("deserializando reserva")
            .map_err(|e| AppError::database("Error al listar reservas", e))?;
        results.push(ReservaResponse::try_from(reserva)?);
    }

    tracing::debug!(total = results.len(), "Reservas encontradas");
    Ok(HttpResponse::Ok().json(results))
}

/// Obtiene una reserva por ID
///
/// # Errores
/// - `400 Bad Request`: ID inválido
/// - `404 Not Found`: la reserva no existe
/// - `500 Internal Server Error`: error de base de datos
#[get("/reservas/{id}")]
async fn get_reserva(repo: web::Data<MongoRepo>, path: web::Path<String>) -> AppResult<impl Responder> {
    let id = parse_reserva_id(&path.into_inner())?;

    let reserva = repo
        .reservas()
        .find_one(doc! { "_id": id })
        .await
        .log_error_context("buscando reserva")
        .map_err(|e| AppError::database("Error al obtener la reserva", e))?
        .ok_or_else(AppError::reserva_not_found)?;

    Ok(HttpResponse::Ok().json(ReservaResponse::try_from(reserva)?))
}

/// Actualiza los campos presentes de una reserva
///
/// Un solo `findOneAndUpdate`: el 404 depende de que el filtro encuentre el
/// documento, no de que cambie algún valor.
///
/// # Errores
/// - `400 Bad Request`: ID inválido o cuerpo sin campos
/// - `404 Not Found`: la reserva no existe
/// - `422 Unprocessable Entity`: algún campo no cumple sus restricciones
/// - `500 Internal Server Error`: error de base de datos
#[put("/reservas/{id}")]
async fn update_reserva(
    repo: web::Data<MongoRepo>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<impl Responder> {
    let id = parse_reserva_id(&path.into_inner())?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("Datos de actualización vacíos".to_string()));
    }
    let update: ReservaUpdate = parse_body(&body)?;
    let set = update.to_set_document();
    if set.is_empty() {
        return Err(AppError::BadRequest("Datos de actualización vacíos".to_string()));
    }

    tracing::debug!(id = %id.to_hex(), campos = ?set.keys().collect::<Vec<_>>(), "Actualizando reserva");

    let reserva = repo
        .reservas()
        .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await
        .log_error_context("actualizando reserva")
        .map_err(|e| AppError::database("Error al actualizar la reserva", e))?
        .ok_or_else(AppError::reserva_not_found)?;

    Ok(HttpResponse::Ok().json(ReservaResponse::try_from(reserva)?))
}

/// Elimina una reserva por ID
///
/// # Respuesta
/// ```json
/// { "mensaje": "Reserva eliminada" }
/// ```
///
/// # Errores
/// - `400 Bad Request`: ID inválido
/// - `404 Not Found`: la reserva no existe
/// - `500 Internal Server Error`: error de base de datos
#[delete("/reservas/{id}")]
async fn delete_reserva(repo: web::Data<MongoRepo>, path: web::Path<String>) -> AppResult<impl Responder> {
    let id = parse_reserva_id(&path.into_inner())?;

    let result = repo
        .reservas()
        .delete_one(doc! { "_id": id })
        .await
        .log_error_context("eliminando reserva")
        .map_err(|e| AppError::database("Error al eliminar la reserva", e))?;

    if result.deleted_count == 0 {
        return Err(AppError::reserva_not_found());
    }

    tracing::info!(id = %id.to_hex(), "Reserva eliminada");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "mensaje": "Reserva eliminada" })))
}

/// Configura las rutas relacionadas con reservas
///
/// # Rutas disponibles
/// - `POST /reservas/` - Crear reserva
/// - `GET /reservas/` - Listar reservas (`?search=`)
/// - `GET /reservas/{id}` - Obtener reserva
/// - `PUT /reservas/{id}` - Actualizar campos de una reserva
/// - `DELETE /reservas/{id}` - Eliminar reserva
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_reserva);
    cfg.service(list_reservas);
    cfg.service(get_reserva);
    cfg.service(update_reserva);
    cfg.service(delete_reserva);
}
