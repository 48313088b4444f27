//! # Manejo de errores
//!
//! Un único enum [`AppError`] cubre los tres tipos de fallo del servicio:
//! validación (400/422), recurso inexistente (404) e infraestructura (500).
//! Cada variante sabe convertirse en respuesta HTTP.

use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::error::Error;
use thiserror::Error;
use validator::ValidationErrors;

/// Detalle de un campo que no pasó la validación
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetalleCampo {
    /// Nombre del campo (`cuerpo` cuando el JSON no se pudo interpretar)
    pub campo: String,
    /// Código corto de la regla que falló (`length`, `range`, `email`, ...)
    pub codigo: String,
    pub mensaje: String,
}

impl DetalleCampo {
    /// Convierte los errores de `validator` en una lista ordenada por campo
    pub fn from_validation(errors: &ValidationErrors) -> Vec<DetalleCampo> {
        let mut detalle: Vec<DetalleCampo> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(campo, errs)| {
                errs.iter().map(move |e| DetalleCampo {
                    campo: campo.to_string(),
                    codigo: e.code.to_string(),
                    mensaje: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.to_string()),
                })
            })
            .collect();

        detalle.sort_by(|a, b| a.campo.cmp(&b.campo).then_with(|| a.codigo.cmp(&b.codigo)));
        detalle
    }
}

/// Tipos de error de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Error de base de datos con la operación que lo produjo
    #[error("{operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// El cuerpo no cumple el esquema de la reserva
    #[error("Error de validación en {} campo(s)", .detalle.len())]
    Validation {
        detalle: Vec<DetalleCampo>,
        /// Cuerpo recibido, tal cual se pudo leer
        cuerpo: serde_json::Value,
    },

    /// El identificador de la ruta no es un ObjectId
    #[error("ID de reserva inválido: {0}")]
    InvalidId(String),

    /// Petición bien formada pero inútil (p. ej. actualización vacía)
    #[error("{0}")]
    BadRequest(String),

    #[error("No encontrado: {0}")]
    NotFound(String),

    /// Error interno simple
    #[error("Error interno: {0}")]
    Internal(String),
}

// Métodos helper para crear errores con contexto
impl AppError {
    /// Crea un error de base de datos con contexto de operación
    pub fn database(operation: &str, source: mongodb::error::Error) -> Self {
        Self::Database {
            operation: operation.to_string(),
            source,
        }
    }

    /// Error de validación a partir del resultado de `validator`
    pub fn validation(errors: &ValidationErrors, cuerpo: serde_json::Value) -> Self {
        Self::Validation {
            detalle: DetalleCampo::from_validation(errors),
            cuerpo,
        }
    }

    /// Error de validación para un cuerpo que ni siquiera deserializa
    pub fn malformed_body(error: &serde_json::Error, cuerpo: serde_json::Value) -> Self {
        Self::Validation {
            detalle: vec![DetalleCampo {
                campo: "cuerpo".to_string(),
                codigo: "json".to_string(),
                mensaje: error.to_string(),
            }],
            cuerpo,
        }
    }

    /// Error de validación para un cuerpo JSON que no es un objeto
    pub fn body_not_object(cuerpo: serde_json::Value) -> Self {
        Self::Validation {
            detalle: vec![DetalleCampo {
                campo: "cuerpo".to_string(),
                codigo: "tipo".to_string(),
                mensaje: "se esperaba un objeto JSON".to_string(),
            }],
            cuerpo,
        }
    }

    pub fn reserva_not_found() -> Self {
        Self::NotFound("Reserva no encontrada".to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            Self::Database { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidId(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Log detallado del error antes de responder
        match self {
            Self::Database { operation, source } => {
                let trace_id = uuid::Uuid::new_v4().to_string();
                tracing::error!(
                    trace_id = %trace_id,
                    operation = %operation,
                    error = %source,
                    error_chain = ?source.source(),
                    "Database error occurred"
                );
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Error de base de datos".to_string(),
                    message: self.to_string(),
                    trace_id: Some(trace_id),
                })
            }
            Self::Validation { detalle, cuerpo } => {
                tracing::warn!(detalle = ?detalle, "Validation error");
                HttpResponse::UnprocessableEntity().json(serde_json::json!({
                    "detalle": detalle,
                    "cuerpo": cuerpo,
                }))
            }
            Self::InvalidId(id) => {
                tracing::warn!(id = %id, "Invalid ObjectId");
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "ID inválido".to_string(),
                    message: "ID de reserva inválido".to_string(),
                    trace_id: None,
                })
            }
            Self::BadRequest(message) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "Petición inválida".to_string(),
                message: message.clone(),
                trace_id: None,
            }),
            Self::NotFound(message) => {
                tracing::info!(message = %message, "Resource not found");
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "No encontrado".to_string(),
                    message: message.clone(),
                    trace_id: None,
                })
            }
            Self::Internal(message) => {
                let trace_id = uuid::Uuid::new_v4().to_string();
                tracing::error!(trace_id = %trace_id, message = %message, "Internal error");
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Error interno".to_string(),
                    message: message.clone(),
                    trace_id: Some(trace_id),
                })
            }
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

pub type AppResult<T> = Result<T, AppError>;

// Conversión desde errores de ObjectId
impl From<mongodb::bson::oid::Error> for AppError {
    fn from(e: mongodb::bson::oid::Error) -> Self {
        Self::InvalidId(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use mongodb::bson::oid::ObjectId;
    use validator::Validate;

    #[derive(Validate)]
    struct Muestra {
        #[validate(length(min = 3, code = "length", message = "muy corto"))]
        nombre: String,
        #[validate(range(min = 1, max = 20))]
        personas: i32,
    }

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn validation_details_are_sorted_by_field() {
        let errors = Muestra { nombre: "ab".into(), personas: 0 }.validate().unwrap_err();
        let detalle = DetalleCampo::from_validation(&errors);

        assert_eq!(detalle.len(), 2);
        assert_eq!(detalle[0].campo, "nombre");
        assert_eq!(detalle[0].mensaje, "muy corto");
        assert_eq!(detalle[1].campo, "personas");
        assert_eq!(detalle[1].codigo, "range");
    }

    #[actix_web::test]
    async fn validation_maps_to_422_with_body_echo() {
        let errors = Muestra { nombre: "ab".into(), personas: 5 }.validate().unwrap_err();
        let cuerpo = serde_json::json!({"nombre": "ab", "personas": 5});
        let (status, body) = body_json(AppError::validation(&errors, cuerpo.clone())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["cuerpo"], cuerpo);
        assert_eq!(body["detalle"][0]["campo"], "nombre");
    }

    #[actix_web::test]
    async fn invalid_object_id_maps_to_400() {
        let err: AppError = ObjectId::parse_str("abc").unwrap_err().into();
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "ID de reserva inválido");
    }

    #[actix_web::test]
    async fn not_found_maps_to_404() {
        let (status, body) = body_json(AppError::reserva_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Reserva no encontrada");
        assert!(body.get("trace_id").is_none());
    }

    #[actix_web::test]
    async fn internal_errors_carry_message_and_trace_id() {
        let (status, body) = body_json(AppError::Internal("plantilla ausente".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "plantilla ausente");
        assert!(body["trace_id"].as_str().is_some_and(|t| t.len() == 36));
    }

    #[test]
    fn status_codes_match_error_kind() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidId("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::reserva_not_found().status_code(), StatusCode::NOT_FOUND);
    }
}
