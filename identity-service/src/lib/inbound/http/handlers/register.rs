use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let name = DisplayName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterCommand::new(name, email, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, email: &str) -> RegisterRequestBody {
        RegisterRequestBody {
            name: name.to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_valid_body_is_normalized() {
        let command = body(" Ada ", "Ada@Example.com").try_into_command().unwrap();
        assert_eq!(command.name.as_str(), "Ada");
        assert_eq!(command.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_invalid_fields_are_unprocessable() {
        let err = body("", "ada@example.com").try_into_command().unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::UnprocessableEntity(_)));

        let err = body("Ada", "nope").try_into_command().unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::UnprocessableEntity(_)));
    }
}
