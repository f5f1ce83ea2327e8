//! HTTPS basic-auth credentials for git transport.

use std::cell::Cell;
use std::fmt;

use git2::{Cred, CredentialType, RemoteCallbacks};

/// Username + token pair handed to libgit2 when the remote asks for credentials.
#[derive(Clone)]
pub struct GitAuth {
    username: String,
    token: String,
}

impl GitAuth {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Remote callbacks that answer credential requests with this pair.
    ///
    /// libgit2 calls the credentials callback again after a rejected attempt,
    /// so a second request fails instead of looping forever.
    pub fn callbacks(&self) -> RemoteCallbacks<'_> {
        let attempts = Cell::new(0u8);
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, _username_from_url, allowed_types| {
            if !allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                return Err(git2::Error::from_str(
                    "remote does not accept username/token authentication",
                ));
            }
            attempts.set(attempts.get() + 1);
            if attempts.get() > 1 {
                return Err(git2::Error::from_str("credentials were rejected by remote"));
            }
            Cred::userpass_plaintext(&self.username, &self.token)
        });
        callbacks
    }
}

impl fmt::Debug for GitAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitAuth")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
