//! Network reachability probing.
//!
//! One probe is a single `ping` with a hard two-second bound. Waiting for a
//! host retries on a fixed schedule and gives up without treating the timeout
//! as fatal; callers continue and still report final status.

use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::report::Report;

/// Hard bound on one probe attempt.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Delay between probe attempts.
const RETRY_DELAY: Duration = Duration::from_secs(10);

/// Maximum probe attempts before giving up.
const MAX_ATTEMPTS: u32 = 10;

/// A single yes/no reachability check.
#[allow(async_fn_in_trait)]
pub trait Probe {
    async fn probe(&self, host: &str) -> bool;
}

/// Probes with the system `ping` binary (`-c 1 -W 1`).
#[derive(Debug, Default)]
pub struct PingProbe;

impl Probe for PingProbe {
    async fn probe(&self, host: &str) -> bool {
        let ping = Command::new("ping")
            .args(["-c", "1", "-W", "1", host])
            .kill_on_drop(true)
            .output();

        match timeout(PROBE_TIMEOUT, ping).await {
            Ok(Ok(output)) => output.status.success(),
            // Timeout or spawn failure both count as unreachable.
            Ok(Err(e)) => {
                tracing::debug!(host, error = %e, "ping failed to run");
                false
            }
            Err(_) => false,
        }
    }
}

/// Poll until `host` answers a probe.
///
/// Returns `true` as soon as a probe succeeds; after [`MAX_ATTEMPTS`] failed
/// attempts spaced [`RETRY_DELAY`] apart, returns `false`.
pub async fn wait_for_reachable<P: Probe>(
    probe: &P,
    host: &str,
    report: &mut dyn Report,
) -> bool {
    for _ in 0..MAX_ATTEMPTS {
        if probe.probe(host).await {
            report.line(&format!("  Successful ping from {}", host));
            return true;
        }
        report.line(&format!("  Cannot ping {}, sleeping...", host));
        tokio::time::sleep(RETRY_DELAY).await;
    }
    false
}
