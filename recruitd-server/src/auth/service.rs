//! Register / login / current-user flows on top of the data-access verbs

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::error::{AuthError, AuthResult};
use super::password::{hash_password, verify_password, BCRYPT_COST};
use super::token::TokenSigner;
use crate::db::{QueryOptions, Store, ValueMap};
use crate::models::user::{self, DEFAULT_ALIAS};
use crate::models::{Credentials, User};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email regex is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// A user plus a freshly issued token
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    store: Store,
    signer: Arc<TokenSigner>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Store, signer: TokenSigner) -> Self {
        Self {
            store,
            signer: Arc::new(signer),
            bcrypt_cost: BCRYPT_COST,
        }
    }

    /// Lower bcrypt cost, for tests
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    pub async fn register(&self, credentials: Credentials) -> AuthResult<Session> {
        let (email, password) = require(credentials)?;

        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }

        let existing = self
            .store
            .find_one(
                user::TABLE,
                &ValueMap::new().with("email", email.as_str()),
                &QueryOptions::new().fields(["id"]),
            )
            .await?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            password: hash_password(&password, self.bcrypt_cost).await?,
            alias: DEFAULT_ALIAS.to_string(),
        };
        self.store.create(user::TABLE, &user.to_values()).await?;
        tracing::info!(user_id = %user.id, "registered user");

        let token = self.signer.issue(user.id)?;
        Ok(Session { user, token })
    }

    pub async fn login(&self, credentials: Credentials) -> AuthResult<Session> {
        let (email, password) = require(credentials)?;

        let record = self
            .store
            .find_one(
                user::TABLE,
                &ValueMap::new().with("email", email),
                &QueryOptions::new(),
            )
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let user = User::from_record(&record)?;

        if !verify_password(&password, &user.password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(user.id)?;
        Ok(Session { user, token })
    }

    /// Resolve an `Authorization` header value.
    ///
    /// No header means no user (`Ok(None)`), not an error.
    pub async fn current_user(&self, authorization: Option<&str>) -> AuthResult<Option<User>> {
        let Some(header) = authorization else {
            return Ok(None);
        };

        let token = header
            .split(' ')
            .nth(1)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedAuthorization)?;
        let claims = self.signer.validate(token)?;

        let record = self
            .store
            .find_one(
                user::TABLE,
                &ValueMap::new().with("id", claims.uid),
                &QueryOptions::new(),
            )
            .await?;

        Ok(record.as_ref().map(User::from_record).transpose()?)
    }
}

fn require(credentials: Credentials) -> AuthResult<(String, String)> {
    match (credentials.email, credentials.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(AuthError::MissingCredentials),
    }
}
