use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user administration.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

/// Create the account unless an active one already holds the email.
///
/// Used at startup to seed the administrator. An existing holder is left
/// untouched, whatever its role.
///
/// # Errors
/// Any [`UserError`] from creation other than `EmailAlreadyExists`.
pub async fn ensure_account(
    service: &dyn UserServicePort,
    command: CreateUserCommand,
) -> Result<(), UserError> {
    let email = command.email.to_string();
    match service.create_user(command).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, email = %email, "Seeded account");
            Ok(())
        }
        Err(UserError::EmailAlreadyExists(_)) => {
            tracing::debug!(email = %email, "Seed account already present");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<PublicUser, UserError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;
        let mut user = User::register(command.name, command.email, password_hash);
        user.role = command.role;

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, role = %created.role, "User created");

        Ok(PublicUser::from(&created))
    }

    async fn get_user(&self, id: &UserId) -> Result<PublicUser, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<PublicUser>, UserError> {
        let users = self.repository.list_active().await?;
        Ok(users.iter().map(PublicUser::from).collect())
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<PublicUser, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                if self.repository.find_by_email(&new_email).await?.is_some() {
                    return Err(UserError::EmailAlreadyExists(new_email.to_string()));
                }
                user.email = new_email;
            }
        }

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.password_hasher.hash(&new_password)?;
        }

        if let Some(new_role) = command.role {
            if new_role != user.role {
                tracing::info!(
                    user_id = %user.id,
                    from = %user.role,
                    to = %new_role,
                    "Changing user role"
                );
                user.role = new_role;
            }
        }

        user.touch();

        let updated_user = self.repository.update(user).await?;
        tracing::debug!(user_id = %updated_user.id, "User updated");

        Ok(PublicUser::from(&updated_user))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.soft_delete(id).await?;
        tracing::info!(user_id = %id, "User soft-deleted");

        Ok(())
    }
}
