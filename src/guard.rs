//! Role-based access guard for protected commands

use crate::error::{Result, ResumeDeskError};
use log::{debug, warn};
use std::collections::BTreeSet;

pub const LOGIN_ROUTE: &str = "/login";

/// Role assumed when a verified token carries none.
pub const DEFAULT_ROLE: &str = "user";

/// The role a verified token acts as. Missing and blank roles become
/// [`DEFAULT_ROLE`].
pub fn effective_role(role: Option<String>) -> String {
    role.filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Loading,
    Authorized { role: String },
    Unauthorized { role: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Nothing decided yet.
    Pending,
    Render,
    Redirect(&'static str),
}

/// Verifies a bearer token and reports the role attached to it.
pub trait TokenVerifier {
    fn verify_token(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// Admits the caller only when a verified token's role is in the allowed
/// set. An empty allowed set admits nobody.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed: BTreeSet<String>,
    state: AuthState,
}

impl RouteGuard {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            state: AuthState::Loading,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Replace the allowed roles. A different set discards any decision.
    pub fn set_allowed_roles<I, S>(&mut self, allowed: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: BTreeSet<String> = allowed.into_iter().map(Into::into).collect();
        if allowed != self.allowed {
            self.allowed = allowed;
            self.state = AuthState::Loading;
        }
    }

    fn admits(&self, role: &str) -> bool {
        self.allowed.contains(role)
    }

    /// Decide once. Later calls return the stored decision without
    /// contacting the verifier again.
    pub async fn resolve<V: TokenVerifier>(&mut self, token: Option<&str>, verifier: &V) -> &AuthState {
        if self.state != AuthState::Loading {
            return &self.state;
        }

        self.state = match token.filter(|t| !t.is_empty()) {
            None => {
                debug!("No access token present");
                AuthState::Unauthorized { role: None }
            }
            Some(token) => match verifier.verify_token(token).await {
                Ok(role) => {
                    let role = effective_role(role);
                    if self.admits(&role) {
                        AuthState::Authorized { role }
                    } else {
                        warn!("Role {} is not allowed here", role);
                        AuthState::Unauthorized { role: Some(role) }
                    }
                }
                Err(e) => {
                    warn!("Token verification failed: {}", e);
                    AuthState::Unauthorized { role: None }
                }
            },
        };
        &self.state
    }

    pub fn outcome(&self) -> GuardOutcome {
        match self.state {
            AuthState::Loading => GuardOutcome::Pending,
            AuthState::Authorized { .. } => GuardOutcome::Render,
            AuthState::Unauthorized { .. } => GuardOutcome::Redirect(LOGIN_ROUTE),
        }
    }

    /// The authorized role, or an `Unauthorized` error for anything else.
    pub fn require(&self) -> Result<&str> {
        match &self.state {
            AuthState::Authorized { role } => Ok(role),
            AuthState::Unauthorized { role } => Err(ResumeDeskError::Unauthorized { role: role.clone() }),
            AuthState::Loading => Err(ResumeDeskError::Unauthorized { role: None }),
        }
    }
}

/// Where a freshly signed-in role lands.
pub fn landing_route(role: &str) -> &'static str {
    match role {
        "admin" => "/admin",
        "trainer" => "/trainer",
        _ => "/user",
    }
}
