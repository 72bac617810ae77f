use std::sync::Arc;

use auth::JwtHandler;
use auth::PasswordHasher;
use auth::TokenLifetime;
use identity_service::domain::authentication::authorizer::RoleAuthorizer;
use identity_service::domain::authentication::models::AccessClaims;
use identity_service::domain::authentication::service::AuthService;
use identity_service::domain::user::models::DisplayName;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::Role;
use identity_service::domain::user::models::User;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::access_policy;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;
use identity_service::outbound::tokens::JwtTokenService;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(
            JwtTokenService::new(JWT_SECRET, TokenLifetime::default())
                .expect("Failed to create token service"),
        );

        let auth_service = Arc::new(AuthService::new(Arc::clone(&repository), tokens));
        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));
        let authorizer = Arc::new(RoleAuthorizer::new(access_policy()));

        let router = create_router(auth_service, user_service, authorizer);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET).expect("Failed to create JWT handler"),
        }
    }

    /// Insert an account with the admin role directly into the store.
    pub async fn seed_admin(&self, email: &str, password: &str) -> User {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");
        let mut admin = User::register(
            DisplayName::new("Admin".to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            hash,
        );
        admin.role = Role::Admin;

        self.repository
            .create(admin)
            .await
            .expect("Failed to seed admin")
    }

    /// Register through the API and return the response body.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in through the API and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    /// Sign arbitrary claims with the server's secret.
    pub fn sign(&self, claims: &AccessClaims) -> String {
        self.jwt_handler.encode(claims).expect("Failed to sign claims")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
