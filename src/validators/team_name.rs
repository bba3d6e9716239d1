use super::ValidationError;

pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::TeamNameEmpty);
    }

    if trimmed.len() > 100 {
        return Err(ValidationError::TeamNameTooLong);
    }

    Ok(())
}
