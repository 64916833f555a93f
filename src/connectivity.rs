//! Detects the endpoint becoming reachable again.
//!
//! A background task opens a TCP connection to the endpoint's host and port
//! on a fixed interval. When a probe succeeds after a failed one, a
//! `NetworkRestored` event is posted so the dashboard reloads.

use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use url::Url;

use crate::event::Event;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Host and port to probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
  pub host: String,
  pub port: u16,
}

impl ProbeTarget {
  pub fn from_url(url: &Url) -> Option<Self> {
    Some(Self {
      host: url.host_str()?.to_string(),
      port: url.port_or_known_default()?,
    })
  }

  /// Whether a TCP connection can be opened within `timeout`
  pub async fn is_reachable(&self, timeout: Duration) -> bool {
    let connect = TcpStream::connect((self.host.as_str(), self.port));
    matches!(tokio::time::timeout(timeout, connect).await, Ok(Ok(_)))
  }
}

/// Tracks probe results and reports offline→online transitions
#[derive(Debug, Default)]
pub struct ReachabilityTracker {
  last: Option<bool>,
}

impl ReachabilityTracker {
  /// Record a probe result. Returns true when it marks a restore.
  /// The first observation only sets the baseline.
  pub fn observe(&mut self, reachable: bool) -> bool {
    let restored = self.last == Some(false) && reachable;
    self.last = Some(reachable);
    restored
  }
}

/// Spawn the probing loop. It ends when the event receiver is dropped.
pub fn spawn_monitor(
  target: ProbeTarget,
  interval: Duration,
  tx: mpsc::UnboundedSender<Event>,
) -> JoinHandle<()> {
  tokio::spawn(async move {
    let mut tracker = ReachabilityTracker::default();
    let mut ticker = tokio::time::interval(interval);

    loop {
      ticker.tick().await;
      let reachable = target.is_reachable(PROBE_TIMEOUT).await;
      debug!(host = %target.host, reachable, "connectivity probe");

      if tracker.observe(reachable) {
        info!(host = %target.host, "network connectivity restored");
        if tx.send(Event::NetworkRestored).is_err() {
          break;
        }
      }
      if tx.is_closed() {
        break;
      }
    }
  })
}
