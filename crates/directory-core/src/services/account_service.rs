// ============================================================================
// Directory Core - Account Service
// File: crates/directory-core/src/services/account_service.rs
// ============================================================================
//! Registration, login, current-user lookup and the bootstrap super-admin.

use std::sync::Arc;
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use directory_shared::utils::mask_email;

use crate::domain::{LoginInput, NewUser, Principal, RegisterInput, User, UserRole};
use crate::error::DomainError;
use crate::providers::AuthProvider;
use crate::repositories::UserRepository;

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    auth: Arc<dyn AuthProvider>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { users, auth }
    }

    pub async fn register(&self, mut input: RegisterInput) -> Result<AuthSession, DomainError> {
        input.email = input.email.trim().to_lowercase();
        info!("Registration attempt for email: {}", mask_email(&input.email));

        // 1. Validate payload
        input.validate().map_err(|e| {
            warn!("Registration rejected: {}", e);
            DomainError::from(e)
        })?;

        // 2. Check if email already exists
        if self.users.find_by_email(&input.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(&input.email));
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        // 3. Hash password and insert
        let password_hash = self.auth.hash_password(&input.password)?;
        let user = self
            .users
            .create(&NewUser {
                email: input.email,
                password_hash,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                phone: input.phone,
                role: input.role.unwrap_or_default(),
            })
            .await?;

        // 4. Issue token
        let token = self.auth.issue_token(&user.principal())?;

        info!(user_id = user.id, role = user.role.as_str(), "Registration successful");
        Ok(AuthSession { user, token })
    }

    /// Unknown email, inactive account and wrong password all fail the same way.
    pub async fn login(&self, mut input: LoginInput) -> Result<AuthSession, DomainError> {
        input.email = input.email.trim().to_lowercase();
        input.validate()?;

        let user = match self.users.find_by_email(&input.email).await? {
            Some(user) if user.is_active => user,
            _ => {
                warn!("Login failed: no active account for: {}", mask_email(&input.email));
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !self.auth.verify_password(&input.password, &user.password_hash)? {
            warn!("Login failed: invalid password for: {}", mask_email(&input.email));
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.auth.issue_token(&user.principal())?;
        info!(user_id = user.id, "Login successful");
        Ok(AuthSession { user, token })
    }

    pub async fn me(&self, principal: &Principal) -> Result<User, DomainError> {
        self.users
            .find_by_id(principal.user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(DomainError::UserNotFound(principal.user_id))
    }

    /// Creates the super-admin account, or resets its password when it exists.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim().to_lowercase();
        let password_hash = self.auth.hash_password(password)?;

        match self.users.find_by_email(&email).await? {
            Some(mut user) => {
                if user.role != UserRole::SuperAdmin {
                    warn!(
                        user_id = user.id,
                        role = user.role.as_str(),
                        "Bootstrap admin email belongs to a non-admin account"
                    );
                }
                if !self.users.update_password(user.id, &password_hash).await? {
                    return Err(DomainError::UserNotFound(user.id));
                }
                user.password_hash = password_hash;
                info!(user_id = user.id, "Bootstrap admin password reset");
                Ok(user)
            }
            None => {
                let user = self
                    .users
                    .create(&NewUser {
                        email,
                        password_hash,
                        first_name: "Super".to_string(),
                        last_name: "Admin".to_string(),
                        phone: None,
                        role: UserRole::SuperAdmin,
                    })
                    .await?;
                info!(user_id = user.id, "Bootstrap admin created");
                Ok(user)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockAuthProvider;
    use crate::repositories::{InMemoryStore, MockUserRepository};

    /// Hashes by prefixing, issues `token-<id>`.
    fn fake_auth() -> MockAuthProvider {
        let mut auth = MockAuthProvider::new();
        auth.expect_hash_password()
            .returning(|plain| Ok(format!("hashed:{}", plain)));
        auth.expect_verify_password()
            .returning(|plain, hash| Ok(hash == format!("hashed:{}", plain)));
        auth.expect_issue_token()
            .returning(|principal| Ok(format!("token-{}", principal.user_id)));
        auth
    }

    fn service() -> AccountService {
        AccountService::new(Arc::new(InMemoryStore::new()), Arc::new(fake_auth()))
    }

    fn registration(email: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: "secret123".to_string(),
            first_name: "Deniz".to_string(),
            last_name: "Kaya".to_string(),
            phone: None,
            role: None,
        }
    }

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();
        let session = service.register(registration("Deniz@Example.com")).await.unwrap();
        assert_eq!(session.user.email, "deniz@example.com");
        assert_eq!(session.user.role, UserRole::Customer);
        assert_eq!(session.token, format!("token-{}", session.user.id));

        let session = service
            .login(login("deniz@example.com", "secret123"))
            .await
            .unwrap();
        assert_eq!(session.user.first_name, "Deniz");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service.register(registration("dup@example.com")).await.unwrap();
        assert!(matches!(
            service.register(registration("DUP@example.com")).await,
            Err(DomainError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service();
        service.register(registration("known@example.com")).await.unwrap();

        let wrong_password = service
            .login(login("known@example.com", "wrong-password"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(login("ghost@example.com", "secret123"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, DomainError::InvalidCredentials));
        assert!(matches!(unknown_email, DomainError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_register_does_not_hash_invalid_input() {
        let mut auth = MockAuthProvider::new();
        auth.expect_hash_password().never();
        let service = AccountService::new(Arc::new(InMemoryStore::new()), Arc::new(auth));

        let mut input = registration("not-an-email");
        input.password = "123".to_string();
        let err = service.register(input).await.unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[tokio::test]
    async fn test_me_returns_current_user() {
        let service = service();
        let session = service.register(registration("me@example.com")).await.unwrap();

        let user = service.me(&session.user.principal()).await.unwrap();
        assert_eq!(user.id, session.user.id);

        let stranger = Principal {
            user_id: 404,
            email: "x@example.com".to_string(),
            role: UserRole::Customer,
        };
        assert!(matches!(
            service.me(&stranger).await,
            Err(DomainError::UserNotFound(404))
        ));
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_then_resets() {
        let service = service();

        let created = service.ensure_admin("admin@example.com", "first-pass").await.unwrap();
        assert_eq!(created.role, UserRole::SuperAdmin);
        assert!(service.login(login("admin@example.com", "first-pass")).await.is_ok());

        let reset = service.ensure_admin("admin@example.com", "second-pass").await.unwrap();
        assert_eq!(reset.id, created.id);
        assert!(service.login(login("admin@example.com", "first-pass")).await.is_err());
        assert!(service.login(login("admin@example.com", "second-pass")).await.is_ok());
    }

    #[tokio::test]
    async fn test_repository_failure_surfaces() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(DomainError::DatabaseError("timeout".into())));
        let service = AccountService::new(Arc::new(users), Arc::new(fake_auth()));

        assert!(matches!(
            service.login(login("a@example.com", "secret123")).await,
            Err(DomainError::DatabaseError(_))
        ));
    }
}
