use crate::error::AppError;

pub fn validate_create_user(name: &str, email: &str) -> Result<(), AppError> {
    validate_name(name)?;
    validate_email(email)
}

pub fn validate_update_user(name: &Option<String>, email: &Option<String>) -> Result<(), AppError> {
    if name.is_none() && email.is_none() {
        return Err(AppError::validation("No update data provided"));
    }
    if let Some(name) = name {
        validate_name(name)?;
    }
    if let Some(email) = email {
        validate_email(email)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if name.len() > 100 {
        return Err(AppError::validation("Name is too long (max 100 characters)"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email.len() <= 255
        && !email.contains(char::is_whitespace)
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}
