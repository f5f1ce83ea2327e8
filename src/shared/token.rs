//! Credential lookup.
//!
//! The token is the only ambient state the pipeline reads. It is fetched
//! through `TokenSource`.

use thiserror::Error;

use super::env_var::EnvVars;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Something that can hand out the GitHub token.
pub trait TokenSource {
    fn token(&self) -> Result<String, TokenError>;
}

/// Reads the token from the `EnvVars` snapshot.
pub struct EnvTokenSource<'a> {
    vars: &'a EnvVars,
}

impl<'a> EnvTokenSource<'a> {
    pub fn new(vars: &'a EnvVars) -> Self {
        Self { vars }
    }
}

impl TokenSource for EnvTokenSource<'_> {
    fn token(&self) -> Result<String, TokenError> {
        self.vars
            .git_token
            .clone()
            .ok_or(TokenError::Missing(EnvVars::git_token_name()))
    }
}
