use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::error;

/// Maximum age of a request timestamp before it is rejected as a replay.
const REPLAY_WINDOW_SECS: u64 = 300;
/// Tolerated clock skew for timestamps slightly in the future.
const FUTURE_SKEW_SECS: u64 = 60;

pub fn verify_signature(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
) -> bool {
    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs(),
        Err(_) => return false,
    };
    verify_signature_at(request_body, timestamp, signature, signing_secret, now)
}

/// Deterministic core of the verifier; `now` is unix seconds.
///
/// A non-numeric timestamp, a timestamp outside the replay window, a
/// malformed signature, or a length mismatch all yield `false` without
/// panicking. The comparison itself is constant-time.
pub fn verify_signature_at(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
    now: u64,
) -> bool {
    let Ok(ts) = timestamp.parse::<u64>() else {
        error!("Non-numeric request timestamp");
        return false;
    };
    if now.saturating_sub(ts) > REPLAY_WINDOW_SECS || ts > now + FUTURE_SKEW_SECS {
        error!("Request timestamp outside the replay window, potential replay attack");
        return false;
    }

    let Some(supplied_hex) = signature.strip_prefix("v0=") else {
        error!("Signature missing v0= prefix");
        return false;
    };
    let Ok(supplied) = hex::decode(supplied_hex) else {
        error!("Signature is not valid hex");
        return false;
    };

    let base_string = format!("v0:{timestamp}:{request_body}");
    let mut mac = match Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return false;
        }
    };
    mac.update(base_string.as_bytes());

    // verify_slice compares in constant time and treats a length mismatch
    // as not-equal.
    mac.verify_slice(&supplied).is_ok()
}

/// Compute the `v0=<hex>` signature Slack would send for this request.
#[must_use]
pub fn compute_signature(timestamp: &str, request_body: &str, signing_secret: &str) -> String {
    let base_string = format!("v0:{timestamp}:{request_body}");
    let mut mac = match Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(base_string.as_bytes());
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}
