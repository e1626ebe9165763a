use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The projection of a user that may leave storage by default: id, display
/// name, and email. Password and reset-token fields are never part of it.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Row fetched explicitly for credential comparison during login. This is
/// the only projection that carries the stored password hash.
#[derive(Debug, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserCredentials {
    /// Drops the hash, leaving the client-safe projection.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
