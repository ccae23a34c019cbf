//! Stripe webhook signature verification.
//!
//! Stripe signs `"{timestamp}.{raw body}"` with HMAC-SHA256 using the endpoint's
//! signing secret and sends the result in the `Stripe-Signature` header as
//! `t=<timestamp>,v1=<hex>[,v1=<hex>...][,v0=<hex>]`. Several `v1` entries are
//! present while a secret is being rolled.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::core::SignatureError;

/// Default age limit for a signed delivery, matching the Stripe SDKs.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Parsed components of the `Stripe-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Every v1 signature in the header.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a `Stripe-Signature` header value.
    ///
    /// Unknown schemes are ignored, as are `v1` entries that are not valid hex;
    /// the header is rejected only when no timestamp or no usable `v1` entry remains.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| SignatureError::MalformedHeader)?);
                }
                "v1" => {
                    if let Ok(bytes) = hex::decode(value) {
                        v1_signatures.push(bytes);
                    }
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;
        if v1_signatures.is_empty() {
            return Err(SignatureError::MalformedHeader);
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
pub struct StripeSignatureVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl StripeSignatureVerifier {
    pub fn new(secret: impl Into<String>, tolerance_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs,
        }
    }

    /// Verifies the signature against the current clock.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), SignatureError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Verifies the signature as of `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// - `MalformedHeader` - header has no timestamp or no v1 signature
    /// - `Mismatch` - no v1 signature matches the payload
    /// - `TimestampOutOfRange` - the signature is older than the tolerance
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), SignatureError> {
        let header = SignatureHeader::parse(signature_header)?;
        let expected = self.compute_signature(header.timestamp, payload);

        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(SignatureError::Mismatch);
        }

        if now - header.timestamp > self.tolerance_secs {
            return Err(SignatureError::TimestampOutOfRange);
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Builds a valid `Stripe-Signature` header value
#[cfg(test)]
pub(crate) fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let verifier = StripeSignatureVerifier::new(secret, DEFAULT_TOLERANCE_SECS);
    format!(
        "t={},v1={}",
        timestamp,
        hex::encode(verifier.compute_signature(timestamp, payload))
    )
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
