use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::ProductFields;

/// First violated field constraint, in declaration order. The display
/// text is the exact wire message for the 400 payload.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Nome inválido")]
    InvalidName,
    #[error("Preço inválido")]
    InvalidPrice,
    #[error("Quantidade inválida")]
    InvalidQuantity,
}

/// Checks a raw request body against the product field contract.
///
/// Fields are validated in a fixed order (`nome`, `preco`, `quantidade`)
/// and only the first violation is reported. Unknown extra keys are
/// ignored; a body that is not a JSON object fails on the first field.
pub fn validate_product_body(body: &Value) -> Result<ProductFields, ValidationError> {
    let Some(object) = body.as_object() else {
        return Err(ValidationError::InvalidName);
    };
    let name = validate_name(object)?;
    let price = validate_price(object)?;
    let quantity = validate_quantity(object)?;
    Ok(ProductFields {
        name,
        price,
        quantity,
    })
}

/// `nome` must be a string with visible content.
fn validate_name(object: &Map<String, Value>) -> Result<String, ValidationError> {
    match object.get("nome").and_then(Value::as_str) {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.to_string()),
        _ => Err(ValidationError::InvalidName),
    }
}

/// `preco` must be a finite number strictly greater than zero.
fn validate_price(object: &Map<String, Value>) -> Result<f64, ValidationError> {
    match object.get("preco").and_then(Value::as_f64) {
        Some(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidPrice),
    }
}

/// `quantidade` must be a whole non-negative number that fits `u32`.
/// A fractionless float such as `7.0` counts as whole.
fn validate_quantity(object: &Map<String, Value>) -> Result<u32, ValidationError> {
    let Some(value) = object.get("quantidade").and_then(Value::as_f64) else {
        return Err(ValidationError::InvalidQuantity);
    };
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(value as u32)
}
