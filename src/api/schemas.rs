//! # Esquemas de la reserva
//!
//! - [`NuevaReserva`]: cuerpo de creación, sin identificador
//! - [`ReservaUpdate`]: cuerpo de actualización, todos los campos opcionales
//! - [`ReservaResponse`]: reserva guardada, siempre con identificador
//!
//! Las restricciones de cada campo se declaran con `validator`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;
use super::{AppError, AppResult};
use crate::db::Reserva;

/// Máximo de reservas devueltas por el listado
pub const LIST_LIMIT: i64 = 100;

/// Datos para crear una reserva
#[derive(Debug, Clone, Deserialize, Validate, PartialEq)]
pub struct NuevaReserva {
    #[validate(length(
        min = 3,
        max = 50,
        message = "el nombre debe tener entre 3 y 50 caracteres"
    ))]
    pub nombre_cliente: String,
    #[serde(deserialize_with = "deserialize_fecha")]
    pub fecha_reserva: DateTime<Utc>,
    #[validate(range(
        min = 1,
        max = 20,
        message = "el número de personas debe estar entre 1 y 20"
    ))]
    pub numero_personas: i32,
    #[validate(length(
        min = 10,
        max = 15,
        message = "el teléfono debe tener entre 10 y 15 caracteres"
    ))]
    pub telefono: String,
    #[validate(email(message = "email inválido"))]
    pub email: String,
}

impl From<NuevaReserva> for Reserva {
    fn from(nueva: NuevaReserva) -> Self {
        Reserva {
            id: None,
            nombre_cliente: nueva.nombre_cliente,
            fecha_reserva: to_bson_datetime(&nueva.fecha_reserva),
            numero_personas: nueva.numero_personas,
            telefono: nueva.telefono,
            email: nueva.email,
        }
    }
}

/// Actualización parcial: solo se escriben los campos presentes.
///
/// Un `null` explícito se trata igual que un campo ausente.
#[derive(Debug, Clone, Default, Deserialize, Validate, PartialEq)]
pub struct ReservaUpdate {
    #[validate(length(
        min = 3,
        max = 50,
        message = "el nombre debe tener entre 3 y 50 caracteres"
    ))]
    pub nombre_cliente: Option<String>,
    #[serde(default, deserialize_with = "deserialize_fecha_opcional")]
    pub fecha_reserva: Option<DateTime<Utc>>,
    #[validate(range(
        min = 1,
        max = 20,
        message = "el número de personas debe estar entre 1 y 20"
    ))]
    pub numero_personas: Option<i32>,
    #[validate(length(
        min = 10,
        max = 15,
        message = "el teléfono debe tener entre 10 y 15 caracteres"
    ))]
    pub telefono: Option<String>,
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,
}

impl ReservaUpdate {
    /// Documento `$set` con los campos presentes (vacío si no hay ninguno)
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(nombre) = &self.nombre_cliente {
            set.insert("nombre_cliente", nombre);
        }
        if let Some(fecha) = &self.fecha_reserva {
            set.insert("fecha_reserva", to_bson_datetime(fecha));
        }
        if let Some(personas) = self.numero_personas {
            set.insert("numero_personas", personas);
        }
        if let Some(telefono) = &self.telefono {
            set.insert("telefono", telefono);
        }
        if let Some(email) = &self.email {
            set.insert("email", email);
        }
        set
    }
}

/// Reserva enviada al cliente, con el ObjectId como string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservaResponse {
    pub id: String,
    pub nombre_cliente: String,
    pub fecha_reserva: DateTime<Utc>,
    pub numero_personas: i32,
    pub telefono: String,
    pub email: String,
}

impl TryFrom<Reserva> for ReservaResponse {
    type Error = AppError;

    fn try_from(reserva: Reserva) -> AppResult<Self> {
        let id = reserva
            .id
            .ok_or_else(|| AppError::Internal("Documento de reserva sin _id".to_string()))?;
        let fecha_reserva = DateTime::<Utc>::from_timestamp_millis(reserva.fecha_reserva.timestamp_millis())
            .ok_or_else(|| {
                AppError::Internal(format!("fecha_reserva fuera de rango en la reserva {}", id.to_hex()))
            })?;

        Ok(ReservaResponse {
            id: id.to_hex(),
            nombre_cliente: reserva.nombre_cliente,
            fecha_reserva,
            numero_personas: reserva.numero_personas,
            telefono: reserva.telefono,
            email: reserva.email,
        })
    }
}

/// Parámetros de consulta del listado
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Texto libre buscado en nombre, teléfono o email
    pub search: Option<String>,
}

impl ListQuery {
    /// Filtro de MongoDB para el listado.
    ///
    /// Sin búsqueda (o con búsqueda vacía) devuelve un filtro vacío. Con
    /// búsqueda, un `$or` de subcadenas sin distinguir mayúsculas; el texto
    /// se escapa para que se compare literalmente.
    pub fn to_filter(&self) -> Document {
        match self.search.as_deref() {
            Some(search) if !search.is_empty() => {
                let pattern = regex::escape(search);
                let regex = doc! { "$regex": pattern, "$options": "i" };
                doc! {
                    "$or": [
                        { "nombre_cliente": regex.clone() },
                        { "telefono": regex.clone() },
                        { "email": regex },
                    ]
                }
            }
            _ => Document::new(),
        }
    }
}

/// Interpreta el cuerpo JSON y aplica las validaciones del tipo destino.
///
/// # Errores
/// - `Validation` si el JSON está mal formado, no es un objeto, falta algún
///   campo o alguna restricción no se cumple. El cuerpo recibido se devuelve en `cuerpo`.
pub fn parse_body<T>(body: &[u8]) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
{
    let cuerpo: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        AppError::malformed_body(&e, serde_json::Value::String(String::from_utf8_lossy(body).into_owned()))
    })?;

    // serde acepta arrays posicionales para structs; aquí solo valen objetos
    if !cuerpo.is_object() {
        return Err(AppError::body_not_object(cuerpo));
    }

    let datos = T::deserialize(&cuerpo).map_err(|e| AppError::malformed_body(&e, cuerpo.clone()))?;

    datos
        .validate()
        .map_err(|errors| AppError::validation(&errors, cuerpo))?;

    Ok(datos)
}

fn to_bson_datetime(fecha: &DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(fecha.timestamp_millis())
}

/// Acepta RFC 3339, fecha-hora ISO sin zona (se asume UTC) o solo fecha.
pub fn parse_fecha(texto: &str) -> Option<DateTime<Utc>> {
    let texto = texto.trim();

    if let Ok(fecha) = DateTime::parse_from_rfc3339(texto) {
        return Some(fecha.with_timezone(&Utc));
    }

    const FORMATOS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for formato in FORMATOS {
        if let Ok(fecha) = NaiveDateTime::parse_from_str(texto, formato) {
            return Some(fecha.and_utc());
        }
    }

    NaiveDate::parse_from_str(texto, "%Y-%m-%d")
        .ok()
        .and_then(|fecha| fecha.and_hms_opt(0, 0, 0))
        .map(|fecha| fecha.and_utc())
}

fn deserialize_fecha<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let texto = String::deserialize(deserializer)?;
    parse_fecha(&texto).ok_or_else(|| {
        serde::de::Error::custom(format!("fecha_reserva inválida: '{}'", texto))
    })
}

fn deserialize_fecha_opcional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(texto) => parse_fecha(&texto).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("fecha_reserva inválida: '{}'", texto))
        }),
        None => Ok(None),
    }
}
