use crate::error::AppError;

pub fn validate_create_project(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Project name is required"));
    }
    if name.len() > 100 {
        return Err(AppError::validation(
            "Project name is too long (max 100 characters)",
        ));
    }
    Ok(())
}

pub fn validate_update_project(name: &Option<String>) -> Result<(), AppError> {
    if let Some(name) = name {
        validate_create_project(name)?;
    }
    Ok(())
}
