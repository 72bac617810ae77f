use std::collections::HashMap;

use crate::domain::authentication::models::Principal;
use crate::domain::user::models::Role;

/// Outcome of a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Declared role requirements per route.
///
/// Keys are the HTTP method and the route pattern as registered with the
/// router (e.g. `("GET", "/api/users/:user_id")`). A route without an entry
/// declares no roles and admits any authenticated caller.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: HashMap<(String, String), Vec<Role>>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the roles accepted on `method route`.
    ///
    /// Declaring the same route twice replaces the earlier entry.
    pub fn require(mut self, method: &str, route: &str, roles: &[Role]) -> Self {
        self.rules.insert(
            (method.to_ascii_uppercase(), route.to_string()),
            roles.to_vec(),
        );
        self
    }

    /// Roles declared for `method route`; empty when none are declared.
    pub fn required_roles(&self, method: &str, route: &str) -> &[Role] {
        self.rules
            .get(&(method.to_ascii_uppercase(), route.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Decides whether a resolved caller may use a route.
///
/// Works only on the role already resolved from the token; it never touches
/// the store. Account liveness is checked upstream during token resolution.
#[derive(Debug, Clone, Default)]
pub struct RoleAuthorizer {
    policy: AccessPolicy,
}

impl RoleAuthorizer {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// Allow iff `required` is empty or contains `role`.
    pub fn authorize(role: Role, required: &[Role]) -> AccessDecision {
        if required.is_empty() || required.contains(&role) {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }

    pub fn required_roles(&self, method: &str, route: &str) -> &[Role] {
        self.policy.required_roles(method, route)
    }

    /// Look up the route's declared roles and check the principal against them.
    pub fn check(&self, principal: &Principal, method: &str, route: &str) -> AccessDecision {
        Self::authorize(principal.role, self.required_roles(method, route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::UserId;

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: UserId::new(),
            email: "a@x.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_user_denied_admin_route() {
        assert_eq!(
            RoleAuthorizer::authorize(Role::User, &[Role::Admin]),
            AccessDecision::Deny
        );
    }

    #[test]
    fn test_admin_allowed_admin_route() {
        assert_eq!(
            RoleAuthorizer::authorize(Role::Admin, &[Role::Admin]),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_empty_requirement_allows_any_role() {
        assert!(RoleAuthorizer::authorize(Role::User, &[]).is_allowed());
        assert!(RoleAuthorizer::authorize(Role::Admin, &[]).is_allowed());
    }

    #[test]
    fn test_multiple_accepted_roles() {
        let required = [Role::User, Role::Admin];
        assert!(RoleAuthorizer::authorize(Role::User, &required).is_allowed());
        assert!(RoleAuthorizer::authorize(Role::Admin, &required).is_allowed());
    }

    #[test]
    fn test_policy_lookup() {
        let policy = AccessPolicy::new()
            .require("GET", "/api/users", &[Role::Admin])
            .require("delete", "/api/users/:user_id", &[Role::Admin]);

        assert_eq!(policy.required_roles("GET", "/api/users"), &[Role::Admin]);
        assert_eq!(
            policy.required_roles("DELETE", "/api/users/:user_id"),
            &[Role::Admin]
        );
        assert!(policy.required_roles("POST", "/api/users").is_empty());
        assert!(policy.required_roles("GET", "/api/auth/me").is_empty());
    }

    #[test]
    fn test_check_uses_declared_roles() {
        let authorizer =
            RoleAuthorizer::new(AccessPolicy::new().require("GET", "/api/users", &[Role::Admin]));

        assert_eq!(
            authorizer.check(&principal(Role::User), "GET", "/api/users"),
            AccessDecision::Deny
        );
        assert_eq!(
            authorizer.check(&principal(Role::Admin), "GET", "/api/users"),
            AccessDecision::Allow
        );
        assert_eq!(
            authorizer.check(&principal(Role::User), "GET", "/api/auth/me"),
            AccessDecision::Allow
        );
    }
}
