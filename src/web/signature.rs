//! Webhook signature verification.
//!
//! The donation platform authenticates its callbacks with a shared secret
//! sent verbatim in the `MMD-Signature` header. Accept/reject semantics are
//! exact string equality; the comparison itself runs in constant time so the
//! check does not leak prefix length through response timing.

/// Verify a webhook signature header against the configured shared secret.
///
/// Returns `true` only when the header value equals the secret exactly.
pub fn verify_hook_signature(secret: &str, signature: &str) -> bool {
    constant_time_compare(secret, signature)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_signature_exact_match() {
        assert!(verify_hook_signature("s3cr3t", "s3cr3t"));
    }

    #[test]
    fn test_verify_signature_mismatch() {
        assert!(!verify_hook_signature("s3cr3t", "wrong"));
        assert!(!verify_hook_signature("s3cr3t", "s3cr3t "));
        assert!(!verify_hook_signature("s3cr3t", ""));
    }

    #[test]
    fn test_verify_signature_empty_secret_rejects_nonempty_header() {
        assert!(!verify_hook_signature("", "anything"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
