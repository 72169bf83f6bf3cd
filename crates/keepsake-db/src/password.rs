//! Password hashing with scrypt and constant-time verification.
//!
//! Stored form is `hex(salt):hex(hash)` so credentials survive as plain
//! text columns without a separate format version.

use rand::RngCore;
use rand::rngs::OsRng;
use scrypt::Params;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 64;

// N=2^14, r=8, p=1 (interactive login cost).
fn params() -> Params {
    Params::new(14, 8, 1, HASH_LEN).expect("scrypt parameters are constant")
}

/// Hash a password with a fresh random salt.
pub fn hash_password(plain: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LEN];
    scrypt::scrypt(plain.as_bytes(), &salt, &params(), &mut hash)
        .expect("output length is constant and non-zero");

    format!("{}:{}", hex::encode(salt), hex::encode(hash))
}

/// Verify a password against a stored `salt:hash` value.
///
/// Any malformed stored value verifies as false rather than erroring; the
/// comparison itself is constant-time.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Some((salt_hex, hash_hex)) = stored.split_once(':') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(hash_hex) else {
        return false;
    };
    if salt.is_empty() || expected.len() != HASH_LEN {
        return false;
    }

    let mut candidate = [0u8; HASH_LEN];
    if scrypt::scrypt(plain.as_bytes(), &salt, &params(), &mut candidate).is_err() {
        return false;
    }

    candidate.ct_eq(expected.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored));
    }

    #[test]
    fn altered_password_fails() {
        let stored = hash_password("hunter2");
        assert!(!verify_password("hunter3", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let a = hash_password("same");
        let b = hash_password("same");
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn malformed_stored_value_is_rejected() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "no-separator"));
        assert!(!verify_password("x", "nothex:nothex"));
        assert!(!verify_password("x", "aabb:aabb"));
    }
}
