use crate::error::AppError;

pub fn validate_roller_type(name: &str, icon: &str, color: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Type name is required"));
    }
    if name.len() > 100 {
        return Err(AppError::validation(
            "Type name is too long (max 100 characters)",
        ));
    }
    if icon.trim().is_empty() {
        return Err(AppError::validation("Type icon is required"));
    }
    if color.trim().is_empty() {
        return Err(AppError::validation("Type color is required"));
    }
    Ok(())
}
