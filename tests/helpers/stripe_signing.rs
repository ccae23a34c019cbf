// Stripe-Signature headers for test deliveries

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// `t=<timestamp>,v1=<hex hmac-sha256 of "{t}.{payload}">`
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.", timestamp).as_bytes());
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}
