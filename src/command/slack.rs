use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Requests older (or newer) than this are rejected as replays.
const MAX_CLOCK_SKEW_SECS: u64 = 60 * 5;

const TOKEN_MAC_KEY: &[u8] = b"slack-command-token";

/// Compares the presented token with the configured one without leaking
/// where they differ through timing.
pub fn token_matches(expected: &str, presented: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(TOKEN_MAC_KEY) else {
        return false;
    };
    mac.update(expected.as_bytes());
    let expected_tag = mac.finalize().into_bytes();

    let Ok(mut mac) = HmacSha256::new_from_slice(TOKEN_MAC_KEY) else {
        return false;
    };
    mac.update(presented.as_bytes());
    mac.verify_slice(&expected_tag).is_ok()
}

/// Checks `X-Slack-Signature` against the raw body using the app's signing secret.
pub fn verify_slack_signature(
    signing_secret: &str,
    body: &str,
    timestamp: &str,
    signature: &str,
    now: u64,
) -> bool {
    let Ok(request_timestamp) = timestamp.parse::<u64>() else {
        return false;
    };

    if now.abs_diff(request_timestamp) > MAX_CLOCK_SKEW_SECS {
        return false;
    }

    let Some(Ok(signature)) = signature.strip_prefix("v0=").map(hex::decode) else {
        return false;
    };

    let base_string = format!("v0:{}:{}", timestamp, body);

    let Ok(mut mac) = HmacSha256::new_from_slice(signing_secret.as_bytes()) else {
        return false;
    };
    mac.update(base_string.as_bytes());
    mac.verify_slice(&signature).is_ok()
}

#[cfg(test)]
pub(crate) fn sign(signing_secret: &str, body: &str, timestamp: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes()).unwrap();
    mac.update(format!("v0:{}:{}", timestamp, body).as_bytes());
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}
