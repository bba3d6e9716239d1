pub mod email;
pub mod team_name;

pub use email::validate_email;
pub use team_name::validate_team_name;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    TeamNameEmpty,
    TeamNameTooLong,
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamNameEmpty => write!(f, "Team name cannot be empty"),
            Self::TeamNameTooLong => write!(f, "Team name is too long (max 100 characters)"),
            Self::EmailEmpty => write!(f, "Email cannot be empty"),
            Self::EmailTooLong => write!(f, "Email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "Invalid email format"),
        }
    }
}

impl std::error::Error for ValidationError {}
