use crate::error::AppError;

// Shared limits for issues and tasks.
const SUMMARY_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2000;

pub fn validate_create_roller(summary: &str, description: &str) -> Result<(), AppError> {
    if summary.trim().is_empty() {
        return Err(AppError::validation("Summary is required"));
    }
    if summary.len() > SUMMARY_MAX {
        return Err(AppError::validation(
            "Summary is too long (max 200 characters)",
        ));
    }
    if description.len() > DESCRIPTION_MAX {
        return Err(AppError::validation(
            "Description is too long (max 2000 characters)",
        ));
    }
    Ok(())
}

pub fn validate_update_roller(
    summary: &Option<String>,
    description: &Option<String>,
) -> Result<(), AppError> {
    if let Some(summary) = summary {
        if summary.trim().is_empty() {
            return Err(AppError::validation("Summary cannot be empty"));
        }
        if summary.len() > SUMMARY_MAX {
            return Err(AppError::validation(
                "Summary is too long (max 200 characters)",
            ));
        }
    }
    if let Some(description) = description {
        if description.len() > DESCRIPTION_MAX {
            return Err(AppError::validation(
                "Description is too long (max 2000 characters)",
            ));
        }
    }
    Ok(())
}
