//! Paste identifier generation and collision handling.

use crate::error::AppError;
use rand::Rng;

/// Alphabet for generated identifiers: 62 alphanumeric characters.
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated identifiers.
pub const GENERATED_ID_LEN: usize = 8;

/// Collision retries before giving up. The keyspace is 62^8, so hitting
/// this bound means the random source is broken, not that ids ran out.
pub const MAX_ID_ATTEMPTS: u32 = 5;

/// Upper bound on caller-supplied custom ids.
pub const MAX_CUSTOM_ID_LEN: usize = 64;

/// Generate a random 8-character identifier.
pub fn random_id() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Allocate an unused identifier with bounded collision retries.
///
/// `probe` returns `true` when an id is already taken. Each attempt draws a
/// fresh id and re-probes, so the loop is self-correcting under races.
///
/// # Errors
/// [`AppError::IdExhausted`] after `max_attempts` consecutive collisions,
/// plus any error the probe itself raises.
pub fn allocate_id<F>(mut probe: F, max_attempts: u32) -> Result<String, AppError>
where
    F: FnMut(&str) -> Result<bool, AppError>,
{
    for _ in 0..max_attempts {
        let id = random_id();
        if !probe(&id)? {
            return Ok(id);
        }
    }
    tracing::error!(
        "Exhausted {} id allocation attempts; random source may be degenerate",
        max_attempts
    );
    Err(AppError::IdExhausted)
}

/// Validate a caller-supplied custom id: letters, numbers, hyphens,
/// underscores, bounded length.
pub fn is_valid_custom_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CUSTOM_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id_shape() {
        for _ in 0..100 {
            let id = random_id();
            assert_eq!(id.len(), GENERATED_ID_LEN);
            assert!(id.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_allocate_id_first_try() {
        let id = allocate_id(|_| Ok(false), MAX_ID_ATTEMPTS).unwrap();
        assert_eq!(id.len(), GENERATED_ID_LEN);
    }

    #[test]
    fn test_allocate_id_retries_after_collisions() {
        let mut calls = 0;
        let id = allocate_id(
            |_| {
                calls += 1;
                Ok(calls < 3) // first two probes collide
            },
            MAX_ID_ATTEMPTS,
        )
        .unwrap();
        assert_eq!(calls, 3);
        assert_eq!(id.len(), GENERATED_ID_LEN);
    }

    #[test]
    fn test_allocate_id_exhaustion() {
        let result = allocate_id(|_| Ok(true), MAX_ID_ATTEMPTS);
        assert!(matches!(result, Err(AppError::IdExhausted)));
    }

    #[test]
    fn test_allocate_id_propagates_probe_error() {
        let result = allocate_id(
            |_| Err(AppError::DatabaseError("store down".to_string())),
            MAX_ID_ATTEMPTS,
        );
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[test]
    fn test_custom_id_validation() {
        assert!(is_valid_custom_id("my-paste_01"));
        assert!(is_valid_custom_id("a"));
        assert!(!is_valid_custom_id(""));
        assert!(!is_valid_custom_id("has space"));
        assert!(!is_valid_custom_id("sneaky/../path"));
        assert!(!is_valid_custom_id(&"x".repeat(MAX_CUSTOM_ID_LEN + 1)));
    }
}
