use crate::error::AppError;

pub fn validate_create_category(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Category name is required"));
    }
    if name.len() > 100 {
        return Err(AppError::validation(
            "Category name is too long (max 100 characters)",
        ));
    }
    Ok(())
}

pub fn validate_update_category(name: &Option<String>) -> Result<(), AppError> {
    if let Some(name) = name {
        validate_create_category(name)?;
    }
    Ok(())
}
