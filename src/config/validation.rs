//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Minimum length for authorization token.
const MIN_TOKEN_LENGTH: usize = 50;

/// Minimum length for user agent.
const MIN_USER_AGENT_LENGTH: usize = 40;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_token(&config.account.authorization_token)?;
    validate_user_agent(&config.account.user_agent)?;
    Ok(())
}

/// Validate the authorization token.
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::MissingConfig("authorization_token".to_string()));
    }

    if token.len() < MIN_TOKEN_LENGTH {
        return Err(Error::ConfigValidation {
            field: "authorization_token".to_string(),
            message: format!(
                "Token must be at least {} characters (got {})",
                MIN_TOKEN_LENGTH,
                token.len()
            ),
        });
    }

    let token_lower = token.to_lowercase();
    if token_lower.contains("replaceme") || token_lower.contains("your_token") {
        return Err(Error::ConfigValidation {
            field: "authorization_token".to_string(),
            message: "Token appears to be a placeholder. Please provide your actual token."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        });
    }

    Ok(())
}
