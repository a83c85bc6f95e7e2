use danga_errors::AppError;
use uuid::{Uuid, Variant};

/// Parses an id sent by the browser. Only RFC 4122 UUIDs of versions 1-5
/// are accepted, matching what the database hands out.
pub fn parse_resource_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(AppError::Validation(format!("{}가 비어 있습니다.", what)));
    }

    let invalid = || AppError::Validation(format!("{} 형식이 올바르지 않습니다.", what));

    let id = Uuid::try_parse(raw).map_err(|_| invalid())?;

    if id.get_variant() != Variant::RFC4122 || !(1..=5).contains(&id.get_version_num()) {
        return Err(invalid());
    }

    Ok(id)
}
