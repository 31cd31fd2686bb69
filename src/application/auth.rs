use std::collections::HashMap;

use crate::domain::UserId;

use super::AppError;

/// A verified caller. Every service operation takes one; the only way to
/// mint an `Identity` from untrusted input is through an [`Authenticator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

impl Identity {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Fixed identity for the single-operator CLI, where the token exchange
    /// happens out of band.
    pub fn local_operator() -> Self {
        Self {
            user_id: UserId::nil(),
        }
    }
}

/// Collaborator that turns a bearer token into a verified identity.
/// Token issuance and storage live in the external auth system; this crate
/// only consumes the verification result.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<Identity, AppError>;
}

/// Token table held in memory. Suits tests and single-process deployments;
/// anything real plugs in its own `Authenticator`.
#[derive(Debug, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_known_token_yields_identity() {
        let identity = Identity::new(Uuid::new_v4());
        let auth = StaticTokenAuthenticator::new().with_token("s3cret", identity.clone());

        assert_eq!(auth.authenticate("s3cret").unwrap(), identity);
    }

    #[test]
    fn test_unknown_token_is_unauthenticated() {
        let auth = StaticTokenAuthenticator::new();
        assert!(matches!(
            auth.authenticate("nope"),
            Err(AppError::Unauthenticated)
        ));
    }
}
