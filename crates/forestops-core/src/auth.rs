use sha2::{Digest, Sha256};

use crate::error::ForestError;
use crate::role::Role;

/// SHA-256 digest of "password".
const DEFAULT_PASSWORD_HASH: &str =
    "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

/// The fixed sign-in table: username, password digest, persona.
pub const CREDENTIALS: &[(&str, &str, Role)] = &[
    ("manager", DEFAULT_PASSWORD_HASH, Role::Manager),
    ("operative", DEFAULT_PASSWORD_HASH, Role::FieldOperative),
    ("gis", DEFAULT_PASSWORD_HASH, Role::GisSpecialist),
    ("emergency", DEFAULT_PASSWORD_HASH, Role::EmergencyCoordinator),
    ("admin", DEFAULT_PASSWORD_HASH, Role::Administrator),
];

/// SHA-256 hash a raw secret, returning the hex-encoded digest.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Match a username/password pair against the credential table.
pub fn authenticate(username: &str, password: &str) -> Result<Role, ForestError> {
    let digest = sha256_hex(password);
    CREDENTIALS
        .iter()
        .find(|(user, hash, _)| *user == username && constant_time_eq(&digest, hash))
        .map(|(_, _, role)| *role)
        .ok_or(ForestError::InvalidCredentials)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_constant_matches_password() {
        assert_eq!(sha256_hex("password"), DEFAULT_PASSWORD_HASH);
    }

    #[test]
    fn all_five_pairs_authenticate() {
        assert_eq!(authenticate("manager", "password"), Ok(Role::Manager));
        assert_eq!(authenticate("operative", "password"), Ok(Role::FieldOperative));
        assert_eq!(authenticate("gis", "password"), Ok(Role::GisSpecialist));
        assert_eq!(
            authenticate("emergency", "password"),
            Ok(Role::EmergencyCoordinator)
        );
        assert_eq!(authenticate("admin", "password"), Ok(Role::Administrator));
    }

    #[test]
    fn unknown_pairs_are_rejected() {
        let bad = [
            ("manager", "Password"),
            ("Manager", "password"),
            ("manager", ""),
            ("", "password"),
            ("root", "password"),
            ("admin", "password "),
            (" admin", "password"),
        ];
        for (user, pass) in bad {
            assert_eq!(
                authenticate(user, pass),
                Err(ForestError::InvalidCredentials),
                "{user:?}/{pass:?} should fail"
            );
        }
    }

    #[test]
    fn constant_time_eq_basic() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
    }
}
