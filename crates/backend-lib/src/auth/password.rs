// ============================
// bankauth-backend/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Records are stored as `salt:derived_key`, both hex encoded. The key is
//! PBKDF2-HMAC-SHA512 over the password, salted with the hex text of 16
//! random bytes.
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// PBKDF2 iteration count
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// Length of the derived key in bytes
pub const DERIVED_KEY_LENGTH: usize = 64;

/// Length of the random salt in bytes
pub const SALT_LENGTH: usize = 16;

/// A stored password hash, split into its two hex segments
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHashRecord {
    salt: String,
    derived_key: String,
}

impl PasswordHashRecord {
    /// Hex encoded salt
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Hex encoded derived key
    pub fn derived_key(&self) -> &str {
        &self.derived_key
    }
}

/// Malformed `salt:derived_key` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedHashRecord;

impl FromStr for PasswordHashRecord {
    type Err = MalformedHashRecord;

    fn from_str(serialized: &str) -> Result<Self, Self::Err> {
        let mut segments = serialized.split(':');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(salt), Some(derived_key), None) if !salt.is_empty() && !derived_key.is_empty() => {
                Ok(Self {
                    salt: salt.to_string(),
                    derived_key: derived_key.to_string(),
                })
            },
            _ => Err(MalformedHashRecord),
        }
    }
}

impl fmt::Display for PasswordHashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.salt, self.derived_key)
    }
}

impl fmt::Debug for PasswordHashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHashRecord")
            .field("salt", &self.salt)
            .field("derived_key", &"<redacted>")
            .finish()
    }
}

fn derive_key(plain: &str, salt_hex: &str) -> Zeroizing<[u8; DERIVED_KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; DERIVED_KEY_LENGTH]);
    pbkdf2_hmac::<Sha512>(plain.as_bytes(), salt_hex.as_bytes(), PBKDF2_ROUNDS, &mut key[..]);
    key
}

/// Hash a password with a fresh random salt
pub fn hash_password(plain: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    let salt = hex::encode(salt);
    let key = derive_key(plain, &salt);

    PasswordHashRecord {
        derived_key: hex::encode(&key[..]),
        salt,
    }
    .to_string()
}

/// Verify a password against a stored `salt:derived_key` record.
///
/// Any malformed record verifies as `false`.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Ok(record) = stored.parse::<PasswordHashRecord>() else {
        return false;
    };
    let Ok(expected) = hex::decode(&record.derived_key).map(Zeroizing::new) else {
        return false;
    };
    // Length is not secret; skip the derivation entirely.
    if expected.len() != DERIVED_KEY_LENGTH {
        return false;
    }

    let candidate = derive_key(plain, &record.salt);
    constant_time_eq(&candidate[..], &expected[..])
}

/// Compare two byte slices without an early exit on the first difference
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
