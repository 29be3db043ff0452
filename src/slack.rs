use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::types::DeployTarget;

type HmacSha256 = Hmac<Sha256>;

/// Verify a Slack request signature (X-Slack-Signature).
///
/// Computes HMAC-SHA256 over `v0:{timestamp}:{body}` with the signing
/// secret and compares against the `v0=`-prefixed hex signature. Requests
/// with a timestamp more than 5 minutes from now are rejected to prevent
/// replay.
pub fn verify_signature(signing_secret: &str, body: &str, timestamp: &str, signature: &str) -> bool {
    let Ok(request_timestamp) = timestamp.parse::<u64>() else {
        return false;
    };
    let current_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    if current_time.abs_diff(request_timestamp) > 60 * 5 {
        return false;
    }

    let Some(sig_hex) = signature.strip_prefix("v0=") else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(sig_hex) else {
        return false;
    };

    let base_string = format!("v0:{timestamp}:{body}");
    let Ok(mut mac) = HmacSha256::new_from_slice(signing_secret.as_bytes()) else {
        return false;
    };
    mac.update(base_string.as_bytes());
    mac.verify_slice(&sig_bytes).is_ok()
}

/// Parse the command text into an environment/service pair.
///
/// The first whitespace-separated token is the environment, the second the
/// service; anything after that is ignored. Fewer than two tokens gets a
/// usage message back instead of a half-formed job name.
pub fn parse_deploy_target(text: &str) -> Result<DeployTarget, String> {
    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(environment), Some(service)) => Ok(DeployTarget {
            environment: environment.to_string(),
            service: service.to_string(),
        }),
        _ => Err("Usage: /deploy <environment> <service>".to_string()),
    }
}
