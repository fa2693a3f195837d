use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::distr::{Alphanumeric, SampleString};
use rand::rngs::{StdRng, SysRng};
use rand::SeedableRng;
use sha2::{Digest, Sha256};

use crate::error::MoodboardError;

pub const DEFAULT_VERIFIER_LENGTH: usize = 64;
pub const MIN_VERIFIER_LENGTH: usize = 43;
pub const MAX_VERIFIER_LENGTH: usize = 128;

/// Generate a PKCE code verifier of `length` alphanumeric characters.
///
/// The generator is seeded from the OS source; a failure there is reported
/// instead of falling back to a weaker one.
pub fn generate_verifier(length: usize) -> Result<String, MoodboardError> {
    if !(MIN_VERIFIER_LENGTH..=MAX_VERIFIER_LENGTH).contains(&length) {
        return Err(MoodboardError::InvalidVerifierLength(length));
    }

    let mut rng = StdRng::try_from_rng(&mut SysRng)
        .map_err(|e| MoodboardError::CryptoUnavailable(e.to_string()))?;
    Ok(Alphanumeric.sample_string(&mut rng, length))
}

/// Derive the S256 code challenge: `BASE64URL(SHA256(verifier))` without padding.
pub fn derive_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_has_requested_length_across_range() {
        for len in MIN_VERIFIER_LENGTH..=MAX_VERIFIER_LENGTH {
            let v = generate_verifier(len).unwrap();
            assert_eq!(v.len(), len);
            assert!(
                v.chars().all(|c| c.is_ascii_alphanumeric()),
                "Invalid char in verifier: {v}"
            );
        }
    }

    #[test]
    fn verifier_rejects_out_of_range_lengths() {
        assert!(matches!(
            generate_verifier(42),
            Err(MoodboardError::InvalidVerifierLength(42))
        ));
        assert!(matches!(
            generate_verifier(129),
            Err(MoodboardError::InvalidVerifierLength(129))
        ));
    }

    #[test]
    fn verifiers_draw_from_whole_alphabet() {
        let pooled: String = (0..32)
            .map(|_| generate_verifier(MAX_VERIFIER_LENGTH).unwrap())
            .collect();
        assert!(pooled.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pooled.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pooled.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn verifiers_are_unique() {
        let a = generate_verifier(DEFAULT_VERIFIER_LENGTH).unwrap();
        let b = generate_verifier(DEFAULT_VERIFIER_LENGTH).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn challenge_matches_rfc7636_appendix_b() {
        assert_eq!(
            derive_challenge("dBjftJeZ4CVP-mJ92K69uCNvK7hYOAaP3F-2QpP8dEBWzPc"),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn challenge_is_deterministic() {
        let verifier = "a".repeat(64);
        assert_eq!(derive_challenge(&verifier), derive_challenge(&verifier));
    }

    #[test]
    fn challenge_changes_with_single_character() {
        let a = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQ";
        let b = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPR";
        assert_ne!(derive_challenge(a), derive_challenge(b));
    }

    #[test]
    fn challenge_is_url_safe_without_padding() {
        let challenge = derive_challenge(&generate_verifier(DEFAULT_VERIFIER_LENGTH).unwrap());
        // SHA-256 digest is 32 bytes: ceil(32*4/3) = 43 chars unpadded
        assert_eq!(challenge.len(), 43);
        for ch in challenge.chars() {
            assert!(
                ch.is_ascii_alphanumeric() || ch == '-' || ch == '_',
                "Invalid char in challenge: '{ch}'"
            );
        }
    }
}
