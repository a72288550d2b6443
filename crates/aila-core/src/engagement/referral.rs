//! Referral code synthesis.
//!
//! Codes attribute invited sign-ups to an existing user. They are generated
//! locally as `AILA` plus 6 random characters from `[A-Z0-9]` and are stable
//! once created. No global uniqueness is guaranteed; collision handling
//! would need a server-side allocation step.

use rand::Rng;

/// Literal prefix of every referral code.
pub const REFERRAL_PREFIX: &str = "AILA";

/// Number of random characters after the prefix.
pub const REFERRAL_SUFFIX_LEN: usize = 6;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Synthesize a new referral code: `AILA` + 6 uppercase alphanumerics.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(REFERRAL_PREFIX.len() + REFERRAL_SUFFIX_LEN);
    code.push_str(REFERRAL_PREFIX);
    for _ in 0..REFERRAL_SUFFIX_LEN {
        let idx = rng.gen_range(0..CHARSET.len());
        code.push(CHARSET[idx] as char);
    }
    code
}

/// Whether a string has the shape of a referral code (`AILA[A-Z0-9]{6}`).
pub fn is_valid_code(code: &str) -> bool {
    code.len() == REFERRAL_PREFIX.len() + REFERRAL_SUFFIX_LEN
        && code.starts_with(REFERRAL_PREFIX)
        && code[REFERRAL_PREFIX.len()..]
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(is_valid_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn test_validation_rejects_wrong_shapes() {
        assert!(!is_valid_code("AILA"));
        assert!(!is_valid_code("AILAabc123"));
        assert!(!is_valid_code("XXXXABC123"));
        assert!(!is_valid_code("AILAABC1234"));
        assert!(is_valid_code("AILAA1B2C3"));
    }
}
