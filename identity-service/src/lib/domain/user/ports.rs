use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;

/// Port for user administration operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create an account on behalf of an administrator.
    ///
    /// # Returns
    /// Created user projection
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - An active account already uses this email
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<PublicUser, UserError>;

    /// Retrieve an active user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is soft-deleted
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<PublicUser, UserError>;

    /// List active users, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<PublicUser>, UserError>;

    /// Update an existing user with optional fields.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional name, email, password and role
    ///
    /// # Returns
    /// Updated user projection
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is soft-deleted
    /// * `EmailAlreadyExists` - New email is bound to another active account
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<PublicUser, UserError>;

    /// Soft-delete an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is already soft-deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Every lookup excludes soft-deleted rows.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - An active account already uses this email
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve an active user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found or soft-deleted)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve an active user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found or soft-deleted)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve all active users, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_active(&self) -> Result<Vec<User>, UserError>;

    /// Update an existing active user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is soft-deleted
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Mark a user as deleted.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is already soft-deleted
    /// * `DatabaseError` - Database operation failed
    async fn soft_delete(&self, id: &UserId) -> Result<(), UserError>;
}
