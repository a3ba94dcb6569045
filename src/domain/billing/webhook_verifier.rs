//! Razorpay webhook signature verification.
//!
//! Razorpay signs the raw request body with HMAC-SHA256 under the
//! webhook secret and sends the hex digest in the `x-razorpay-signature`
//! header. Verification must run over the exact bytes received:
//! re-serializing a parsed body can change byte content and break the
//! signature for perfectly valid requests.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for Razorpay webhook signatures.
///
/// The secret is held in a [`SecretString`] and is never logged or
/// echoed anywhere.
#[derive(Clone)]
pub struct RazorpayWebhookVerifier {
    secret: SecretString,
}

impl RazorpayWebhookVerifier {
    /// Creates a new verifier with the given webhook signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies the signature against the raw request bytes.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::InvalidSignature` when the header is not
    /// valid hex or the digest does not match.
    pub fn verify(&self, payload: &[u8], signature_hex: &str) -> Result<(), WebhookError> {
        let received =
            hex_decode(signature_hex.trim()).ok_or(WebhookError::InvalidSignature)?;

        let expected = self.compute_digest(payload);

        if !constant_time_compare(&expected, &received) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }

    /// Computes the HMAC-SHA256 digest of the payload.
    fn compute_digest(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for RazorpayWebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret, even in debug output
        f.debug_struct("RazorpayWebhookVerifier").finish_non_exhaustive()
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak information about the
/// expected digest.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return None;
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    let chars: Vec<char> = hex.chars().collect();
    for pair in chars.chunks(2) {
        let hi = pair[0].to_digit(16)?;
        let lo = pair[1].to_digit(16)?;
        bytes.push(((hi << 4) | lo) as u8);
    }
    Some(bytes)
}

/// Encode bytes as a lowercase hex string.
#[cfg(test)]
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Computes the hex signature for a payload, for use in test fixtures.
#[cfg(test)]
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(payload);
    hex_encode(&mac.finalize().into_bytes())
}
