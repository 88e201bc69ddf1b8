//! Capability token guarding the active drag session.

use std::fmt;

/// Proof of the right to mutate or clear the active drag session.
///
/// Tokens are minted exclusively by the session registry when a session is
/// stored; holding the matching token is the only way to clear or exclusively
/// read that session. The check is equality, not identity, so a clone of the
/// token is as good as the original. Unlike the other ID types there are no
/// parsing conveniences: a token cannot be built from a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(uuid::Uuid);

impl SessionToken {
    /// Mints a fresh token. Only the session registry should call this.
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    // Tokens are capabilities; never print the full value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.0.simple().to_string();
        write!(f, "token({}..)", &raw[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_tokens_differ() {
        assert_ne!(SessionToken::mint(), SessionToken::mint());
    }

    #[test]
    fn clones_compare_equal() {
        let token = SessionToken::mint();
        assert_eq!(token.clone(), token);
    }

    #[test]
    fn display_does_not_leak_the_full_token() {
        let token = SessionToken::mint();
        let shown = token.to_string();
        assert!(shown.len() < 32);
    }
}
