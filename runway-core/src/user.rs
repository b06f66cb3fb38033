use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use runway_shared::Masked;

/// Numeric user identifier handed out at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digest(&self) -> UserDigest {
        UserDigest::of(self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex-encoded SHA-256 of a user ID. Used only as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDigest(String);

impl UserDigest {
    pub fn of(id: &UserId) -> Self {
        Self(hex::encode(Sha256::digest(id.as_str().as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: Masked<String>,
    pub age: u32,
    pub digest: UserDigest,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, age: u32) -> Self {
        let digest = id.digest();
        Self {
            id,
            name: Masked(name.into()),
            age,
            digest,
        }
    }

    pub fn name(&self) -> &str {
        self.name.inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable_sha256() {
        let id = UserId::new("42");
        assert_eq!(
            id.digest().as_str(),
            "73475cb40a568e8da8a045ced110137e159f890ac4da883b6b17dc651b3a8049"
        );
        assert_eq!(id.digest(), UserDigest::of(&UserId::new("42")));
        assert_ne!(id.digest(), UserId::new("43").digest());
    }

    #[test]
    fn test_user_debug_masks_name() {
        let user = User::new(UserId::new("17"), "Grace Hopper", 37);
        let rendered = format!("{:?}", user);
        assert!(!rendered.contains("Grace"));
        assert_eq!(user.name(), "Grace Hopper");
    }
}
