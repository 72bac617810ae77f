use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let name = self.name.map(DisplayName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        let role = self.role.as_deref().map(str::parse::<Role>).transpose()?;

        Ok(UpdateUserCommand {
            name,
            email,
            password: self.password,
            role,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_body_leaves_other_fields_unset() {
        let command = UpdateUserRequest {
            name: None,
            email: None,
            password: None,
            role: Some("Admin".to_string()),
        }
        .try_into_command()
        .unwrap();

        assert_eq!(command.role, Some(Role::Admin));
        assert!(command.name.is_none());
        assert!(command.email.is_none());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = UpdateUserRequest {
            name: None,
            email: None,
            password: None,
            role: Some("root".to_string()),
        }
        .try_into_command();

        assert!(matches!(result, Err(UserError::InvalidRole(_))));
    }
}
