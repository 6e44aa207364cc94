use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AuthFailure, PledgerError, Result};
use crate::store::Owner;

const USERS_FILE: &str = "users.json";
const HASH_ROUNDS: u32 = 100_000;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub password_hash: String,
    /// Hex salt. Empty for records written by the legacy unsalted scheme,
    /// which still verify through the single-digest path.
    #[serde(default)]
    pub salt: String,
    pub created_at: String,
}

/// An authenticated identity, passed explicitly into store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

impl Session {
    pub fn owner(&self) -> Owner {
        Owner::User(self.email.clone())
    }
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

fn new_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Iterated salted SHA-256. Not memory-hard, but a deliberate upgrade over
/// the legacy single unsalted digest: identical passwords no longer collide
/// across users, and brute force pays per-guess work.
fn hash_password(password: &str, salt_hex: &str) -> String {
    let salt = hex::decode(salt_hex).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(&salt);
    hasher.update(password.as_bytes());
    let mut digest = hasher.finalize();
    for _ in 1..HASH_ROUNDS {
        digest = Sha256::digest(digest);
    }
    hex::encode(digest)
}

/// The legacy scheme: one unsalted digest of the plaintext.
fn legacy_hash(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn valid_email(email: &str) -> bool {
    // Deliberately weak check: must contain '@' and '.'.
    email.contains('@') && email.contains('.')
}

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// Email -> UserRecord map in a pretty-printed JSON file. Every successful
/// registration rewrites the whole file.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(USERS_FILE),
        })
    }

    fn load(&self) -> Result<BTreeMap<String, UserRecord>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map_err(|e| PledgerError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, users: &BTreeMap<String, UserRecord>) -> Result<()> {
        let json = serde_json::to_string_pretty(users)
            .map_err(|e| PledgerError::Storage(e.to_string()))?;
        std::fs::write(&self.path, format!("{json}\n"))?;
        Ok(())
    }

    pub fn register(&self, email: &str, password: &str) -> Result<()> {
        if !valid_email(email) {
            return Err(PledgerError::InvalidEmail(email.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PledgerError::WeakPassword);
        }
        let mut users = self.load()?;
        if users.contains_key(email) {
            return Err(PledgerError::DuplicateEmail(email.to_string()));
        }
        let salt = new_salt();
        users.insert(
            email.to_string(),
            UserRecord {
                password_hash: hash_password(password, &salt),
                salt,
                created_at: chrono::Local::now().format("%Y-%m-%d").to_string(),
            },
        );
        self.save(&users)
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        let users = self.load()?;
        let record = users
            .get(email)
            .ok_or(PledgerError::Auth(AuthFailure::UnknownEmail))?;
        let supplied = if record.salt.is_empty() {
            legacy_hash(password)
        } else {
            hash_password(password, &record.salt)
        };
        if !constant_time_eq(&supplied, &record.password_hash) {
            return Err(PledgerError::Auth(AuthFailure::WrongPassword));
        }
        Ok(Session { email: email.to_string() })
    }
}
