use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for creating a user as an administrator (raw JSON)
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `user` when omitted.
    pub role: Option<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let name = DisplayName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let role = self
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()?
            .unwrap_or_default();

        Ok(CreateUserCommand {
            name,
            email,
            password: self.password,
            role,
        })
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .create_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: "Grace".to_string(),
            email: "Grace@Example.com".to_string(),
            password: "pw".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_role_defaults_to_user() {
        let command = request(None).try_into_command().unwrap();

        assert_eq!(command.role, Role::User);
        assert_eq!(command.email.as_str(), "grace@example.com");
    }

    #[test]
    fn test_explicit_role_is_parsed() {
        let command = request(Some("admin")).try_into_command().unwrap();
        assert_eq!(command.role, Role::Admin);
    }

    #[test]
    fn test_unknown_role_is_unprocessable() {
        let err = request(Some("root")).try_into_command().unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::UnprocessableEntity(_)));
    }
}
