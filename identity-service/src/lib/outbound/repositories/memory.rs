use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Soft-deleted users stay in the map with `deleted_at` set. Email uniqueness
/// among active users is checked and written under one write lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<UserId, User>, email: &EmailAddress, except: UserId) -> bool {
    users
        .values()
        .any(|u| u.is_active() && u.id != except && &u.email == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, user.id) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        if users.contains_key(&user.id) {
            return Err(UserError::DatabaseError(format!(
                "duplicate user id {}",
                user.id
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.get(id).filter(|u| u.is_active()).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.is_active() && &u.email == email)
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        let mut active: Vec<User> = users.values().filter(|u| u.is_active()).cloned().collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        match users.get(&user.id) {
            Some(existing) if existing.is_active() => {}
            _ => return Err(UserError::NotFound(user.id.to_string())),
        }
        if email_taken(&users, &user.email, user.id) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn soft_delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        match users.get_mut(id) {
            Some(user) if user.is_active() => {
                let now = Utc::now();
                user.deleted_at = Some(now);
                user.updated_at = now;
                Ok(())
            }
            _ => Err(UserError::NotFound(id.to_string())),
        }
    }
}
