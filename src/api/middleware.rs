//! # Utilidades de logging para errores
//!
//! Registra la cadena completa (`source()`) de un error antes de convertirlo
//! en respuesta HTTP.

use std::error::Error as StdError;

/// Registra la cadena completa de errores
///
/// # Parámetros
/// - `error`: Error a analizar y registrar
/// - `context`: Contexto opcional para añadir información
pub fn log_error_chain<E>(error: &E, context: Option<&str>)
where
    E: StdError + 'static,
{
    let error_chain = error_chain(error);

    if let Some(ctx) = context {
        tracing::error!(
            context = %ctx,
            error_chain = ?error_chain,
            "Error with full chain (with context)"
        );
    } else {
        tracing::error!(
            error_chain = ?error_chain,
            "Error with full chain"
        );
    }
}

/// Mensajes de la cadena de errores, del más externo al más interno
pub fn error_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current_error: Option<&(dyn StdError + 'static)> = Some(error);

    while let Some(err) = current_error {
        chain.push(err.to_string());
        current_error = err.source();
    }

    chain
}

/// Extension trait para Results que añade logging automático de error chains
///
/// # Ejemplo de uso
/// ```ignore
/// repo.reservas()
///     .insert_one(reserva)
///     .await
///     .log_error_context("insertando reserva")?;
/// ```
pub trait ErrorLogExt<T, E> {
    /// Loggea la cadena de errores con contexto adicional
    fn log_error_context(self, context: &str) -> Result<T, E>;
}

impl<T, E> ErrorLogExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    fn log_error_context(self, context: &str) -> Result<T, E> {
        if let Err(ref error) = self {
            log_error_chain(error, Some(context));
        }
        self
    }
}
