use crate::error::AppError;

pub fn validate_comment_body(body: &str) -> Result<(), AppError> {
    if body.trim().is_empty() {
        return Err(AppError::validation("Comment body is required"));
    }
    if body.len() > 2000 {
        return Err(AppError::validation(
            "Comment body is too long (max 2000 characters)",
        ));
    }
    Ok(())
}
