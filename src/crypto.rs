//! Secret handling for the seeder: random password generation and
//! AES-256-CTR encryption of values persisted in the settings store.

use aes::cipher::{KeyIvInit, StreamCipher};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::SeedError;

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

/// Generated passwords default to this length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 24;

const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random alphanumeric password containing at least one digit.
pub fn generate_password(length: usize) -> Result<String, SeedError> {
    if length == 0 {
        return Err(SeedError::GenerationError(
            "password length must be at least 1".to_string(),
        ));
    }
    let mut rng = rand::rng();
    let mut chars: Vec<char> = (0..length)
        .map(|_| char::from(PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())]))
        .collect();
    if !chars.iter().any(char::is_ascii_digit) {
        let slot = rng.random_range(0..length);
        chars[slot] = char::from(rng.random_range(b'0'..=b'9'));
    }
    Ok(chars.into_iter().collect())
}

/// Serializable envelope for an encrypted value. Both fields are hex encoded
/// so the envelope can be stored as a plain JSON string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub iv: String,
    pub content: String,
}

/// Symmetric codec for secrets at rest. AES-256-CTR with a fresh random IV
/// per encryption.
#[derive(Debug)]
pub struct SecretCodec {
    key: [u8; KEY_LEN],
}

impl SecretCodec {
    /// Builds a codec from raw key bytes. The key must be exactly 32 bytes.
    pub fn from_key_bytes(key_bytes: &[u8]) -> Result<Self, SeedError> {
        let key: [u8; KEY_LEN] = key_bytes
            .try_into()
            .map_err(|_| SeedError::InvalidKeyLength(key_bytes.len()))?;
        Ok(Self { key })
    }

    /// Encrypts a plaintext value into an envelope. Empty input passes
    /// through as `None` rather than producing an empty ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Option<EncryptedPayload> {
        if plaintext.is_empty() {
            return None;
        }
        let mut iv = [0u8; IV_LEN];
        rand::rng().fill_bytes(&mut iv);

        let mut buf = plaintext.as_bytes().to_vec();
        let mut cipher = Aes256Ctr::new(&self.key.into(), &iv.into());
        cipher.apply_keystream(&mut buf);

        Some(EncryptedPayload {
            iv: hex::encode(iv),
            content: hex::encode(buf),
        })
    }

    /// Decrypts an envelope back into the plaintext value.
    pub fn decrypt(&self, payload: &EncryptedPayload) -> Result<String, SeedError> {
        let iv_bytes = hex::decode(&payload.iv)
            .map_err(|e| SeedError::UnexpectedError(format!("bad IV encoding: {e}")))?;
        let iv: [u8; IV_LEN] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| SeedError::UnexpectedError("IV length mismatch".to_string()))?;
        let mut buf = hex::decode(&payload.content)
            .map_err(|e| SeedError::UnexpectedError(format!("bad ciphertext encoding: {e}")))?;

        let mut cipher = Aes256Ctr::new(&self.key.into(), &iv.into());
        cipher.apply_keystream(&mut buf);

        String::from_utf8(buf)
            .map_err(|e| SeedError::UnexpectedError(format!("decrypted value is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PASSWORD_LENGTH, EncryptedPayload, SecretCodec, generate_password};
    use crate::error::SeedError;

    #[test]
    fn password_has_requested_length_and_charset() {
        for length in [1, 2, 24, 64] {
            let password = generate_password(length).expect("generation should succeed");
            assert_eq!(password.len(), length);
            assert!(
                password.chars().all(|c| c.is_ascii_alphanumeric()),
                "unexpected character in {password:?}"
            );
        }
    }

    #[test]
    fn password_always_contains_a_digit() {
        for _ in 0..200 {
            let password =
                generate_password(DEFAULT_PASSWORD_LENGTH).expect("generation should succeed");
            assert!(
                password.chars().any(|c| c.is_ascii_digit()),
                "no digit in {password:?}"
            );
        }
    }

    #[test]
    fn single_char_password_is_a_digit() {
        for _ in 0..50 {
            let password = generate_password(1).expect("generation should succeed");
            assert!(password.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn zero_length_password_is_rejected() {
        let err = generate_password(0).unwrap_err();
        assert!(matches!(err, SeedError::GenerationError(_)));
    }

    #[test]
    fn rejects_bad_key_lengths() {
        let err = SecretCodec::from_key_bytes(&[1u8; 16]).unwrap_err();
        assert!(matches!(err, SeedError::InvalidKeyLength(16)));
        let err = SecretCodec::from_key_bytes(&[1u8; 33]).unwrap_err();
        assert!(matches!(err, SeedError::InvalidKeyLength(33)));
    }

    #[test]
    fn empty_plaintext_passes_through() {
        let codec = SecretCodec::from_key_bytes(&[7u8; 32]).expect("valid key");
        assert!(codec.encrypt("").is_none());
    }

    #[test]
    fn encrypts_and_decrypts_round_trip() {
        let codec = SecretCodec::from_key_bytes(&[42u8; 32]).expect("valid key");
        let payload = codec.encrypt("s3cret-proxy-password").expect("non-empty input");
        assert_eq!(payload.iv.len(), 32, "IV should be 16 hex-encoded bytes");
        assert_eq!(payload.content.len(), "s3cret-proxy-password".len() * 2);
        let plaintext = codec.decrypt(&payload).expect("decryption should succeed");
        assert_eq!(plaintext, "s3cret-proxy-password");
    }

    #[test]
    fn fresh_iv_per_encryption() {
        let codec = SecretCodec::from_key_bytes(&[9u8; 32]).expect("valid key");
        let first = codec.encrypt("same input").expect("non-empty input");
        let second = codec.encrypt("same input").expect("non-empty input");
        assert_ne!(first.iv, second.iv);
        assert_ne!(first.content, second.content);
    }

    #[test]
    fn envelope_serializes_with_stable_field_names() {
        let payload = EncryptedPayload {
            iv: "00".repeat(16),
            content: "ff".to_string(),
        };
        let json = serde_json::to_string(&payload).expect("serialization should succeed");
        assert!(json.contains("\"iv\""));
        assert!(json.contains("\"content\""));
        let back: EncryptedPayload = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(back, payload);
    }
}
