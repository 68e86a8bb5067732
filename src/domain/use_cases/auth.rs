use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::{deny_key, ACCESS_DENY_PREFIX, REFRESH_DENY_PREFIX};
use crate::auth::password::{hash_password, verify_password};
use crate::entities::token::{AuthResponse, Claims};
use crate::entities::user::{SessionUser, SignInRequest, SignUpRequest, SignUpResponse, User};
use crate::errors::{AppError, AuthError};
use crate::repositories::token::{TokenDenyList, TokenServiceRepository};
use crate::repositories::user::UserRepository;

pub struct AuthHandler {
    pub user_repo: Arc<dyn UserRepository>,
    pub token_service: Arc<dyn TokenServiceRepository>,
    pub deny_list: Option<Arc<dyn TokenDenyList>>,
}

fn seconds_until(exp: usize) -> Option<u64> {
    let now = Utc::now().timestamp().max(0) as usize;
    exp.checked_sub(now).filter(|ttl| *ttl > 0).map(|ttl| ttl as u64)
}

impl AuthHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_service: Arc<dyn TokenServiceRepository>,
        deny_list: Option<Arc<dyn TokenDenyList>>,
    ) -> Self {
        AuthHandler {
            user_repo,
            token_service,
            deny_list,
        }
    }

    /// Registers a new user with a non-admin profile
    pub async fn register(&self, request: SignUpRequest) -> Result<SignUpResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let id = self.user_repo.create_user_with_profile(&user_insert).await?;
        tracing::info!(user_id = %id, "User registered");

        Ok(SignUpResponse {
            id,
            message: "User created successfully".to_string(),
        })
    }

    /// Logs in a user by validating credentials and generating JWTs
    pub async fn login(&self, request: SignInRequest) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let user = self.user_repo.get_user_by_email(&email)
            .await
            .map_err(|e| {
                tracing::error!("User lookup failed: {}", e);
                AuthError::WrongCredentials
            })?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        let refresh_token = self.token_service.create_refresh_jwt(&user.id)
            .map_err(|e| {
                tracing::warn!("Failed to create refresh JWT: {}", e);
                AuthError::TokenCreation
            })?;
        Ok(AuthResponse::new(access_token, refresh_token))
    }

    /// Issues a fresh pair, reloading the user so admin changes take effect.
    /// The presented refresh token is retired when a deny list is configured.
    pub async fn refresh_token(&self, token: &str) -> Result<AuthResponse, AuthError> {
        let decoded = self.token_service.decode_refresh_jwt(token)?;

        if self.is_denied(REFRESH_DENY_PREFIX, token).await {
            return Err(AuthError::TokenRevoked);
        }

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AuthError::InvalidUserId)?;

        let user = self.user_repo.get_user_by_id(&user_id)
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let response = self.create_auth_response(&user)?;

        if let Some(ttl) = seconds_until(decoded.claims.exp) {
            self.deny(REFRESH_DENY_PREFIX, token, ttl).await?;
        }

        Ok(response)
    }

    /// Puts both tokens on the deny list until they expire. Without a deny
    /// list the client simply discards them.
    pub async fn sign_out(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        let refresh_claims = self.token_service.decode_refresh_jwt(refresh_token)?.claims;

        if self.deny_list.is_none() {
            tracing::debug!("No deny list configured; sign-out is client side only");
            return Ok(());
        }

        if let Some(ttl) = seconds_until(refresh_claims.exp) {
            self.deny(REFRESH_DENY_PREFIX, refresh_token, ttl).await?;
        }

        if let Ok(access) = self.token_service.decode_jwt(access_token) {
            if let Some(ttl) = seconds_until(access.claims.exp) {
                self.deny(ACCESS_DENY_PREFIX, access_token, ttl).await?;
            }
        }

        Ok(())
    }

    /// Decodes an access token and rejects it if it was signed out.
    pub async fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.token_service.decode_jwt(token)?.claims;

        if self.is_denied(ACCESS_DENY_PREFIX, token).await {
            return Err(AuthError::TokenRevoked);
        }

        Ok(claims)
    }

    pub async fn session(&self, claims: &Claims) -> Result<SessionUser, AppError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::UnauthorizedAccess)?;

        self.user_repo
            .get_user_by_id(&user_id)
            .await?
            .map(SessionUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn deny(&self, prefix: &str, token: &str, ttl: u64) -> Result<(), AuthError> {
        match &self.deny_list {
            Some(list) => list.deny(&deny_key(prefix, token), ttl).await,
            None => Ok(()),
        }
    }

    async fn is_denied(&self, prefix: &str, token: &str) -> bool {
        let Some(list) = &self.deny_list else {
            return false;
        };

        list.is_denied(&deny_key(prefix, token))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Deny list lookup failed: {}", e);
                false
            })
    }
}
