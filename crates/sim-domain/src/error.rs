use thiserror::Error;

/// Error del dominio de reconciliación.
///
/// El núcleo no falla ante datos imperfectos (los problemas de calidad se
/// reportan como `Flag`); estos errores sólo aparecen en parseos estrictos y
/// en constructores que validan rangos.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    ValidationError(String),

    #[error("Error de serialización: {0}")]
    SerializationError(String),
}

// Conversión desde serde_json::Error a DomainError
impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_variant_format() {
        let err = DomainError::ValidationError("porcentaje fuera de rango".into());
        assert_eq!(err.to_string(), "Error de validación: porcentaje fuera de rango");
    }

    #[test]
    fn serde_error_converts_to_serialization_variant() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DomainError = serde_err.into();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}
