//! Hashing utilities for the policy evaluator.

use crate::policy::PolicyRule;
use sha2::{Digest, Sha256};

/// Prefix for policy store fingerprints.
pub const FINGERPRINT_PREFIX: &str = "p:";

/// Computes SHA-256 hash of data and returns hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Computes a fingerprint for an ordered list of rules.
///
/// Each string field is length-prefixed so that no two distinct rule lists
/// feed the same bytes to the hasher.
pub fn compute_fingerprint(rules: &[PolicyRule]) -> String {
    let mut data = Vec::new();
    data.extend_from_slice(&(rules.len() as u64).to_be_bytes());
    for rule in rules {
        for field in [
            &rule.role,
            &rule.user,
            &rule.group,
            &rule.resource,
            &rule.namespace,
            &rule.non_resource_path,
        ] {
            data.extend_from_slice(&(field.len() as u64).to_be_bytes());
            data.extend_from_slice(field.as_bytes());
        }
        data.push(u8::from(rule.read_only));
    }
    format!("{}{}", FINGERPRINT_PREFIX, sha256_hex(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::default_policies;

    #[test]
    fn test_sha256() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_stable() {
        let a = compute_fingerprint(&default_policies());
        let b = compute_fingerprint(&default_policies());
        assert_eq!(a, b);
        assert!(a.starts_with(FINGERPRINT_PREFIX));
        assert_eq!(a.len(), FINGERPRINT_PREFIX.len() + 64);
    }

    #[test]
    fn test_fingerprint_sensitive_to_content_and_order() {
        let defaults = default_policies();
        let mut reversed = defaults.clone();
        reversed.reverse();
        assert_ne!(compute_fingerprint(&defaults), compute_fingerprint(&reversed));

        let mut flipped = defaults.clone();
        flipped[0].read_only = false;
        assert_ne!(compute_fingerprint(&defaults), compute_fingerprint(&flipped));

        let split_a = vec![PolicyRule::new().with_role("ab")];
        let split_b = vec![PolicyRule::new().with_role("a").with_user("b")];
        assert_ne!(compute_fingerprint(&split_a), compute_fingerprint(&split_b));
    }

    #[test]
    fn test_fingerprint_is_sha256_of_encoded_fields() {
        let mut data = 1u64.to_be_bytes().to_vec();
        for _ in 0..6 {
            data.extend_from_slice(&0u64.to_be_bytes());
        }
        data.push(0);
        assert_eq!(
            compute_fingerprint(&[PolicyRule::new()]),
            format!("{}{}", FINGERPRINT_PREFIX, sha256_hex(&data))
        );
    }

    #[test]
    fn test_fingerprint_empty() {
        assert_ne!(compute_fingerprint(&[]), compute_fingerprint(&default_policies()));
    }
}
