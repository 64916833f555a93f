//! Cancellable delayed delivery of a value into an event channel.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Holds at most one pending scheduled send.
///
/// Scheduling a new value aborts the pending one, so only the value given
/// to the last `schedule` call within a quiet period is delivered.
pub struct Debouncer<T> {
  delay: Duration,
  tx: mpsc::UnboundedSender<T>,
  pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
  pub fn new(delay: Duration, tx: mpsc::UnboundedSender<T>) -> Self {
    Self {
      delay,
      tx,
      pending: None,
    }
  }

  /// Deliver `value` after the delay unless rescheduled or cancelled first.
  pub fn schedule(&mut self, value: T) {
    self.cancel();

    let tx = self.tx.clone();
    let delay = self.delay;
    self.pending = Some(tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      // Receiver may be gone during shutdown
      let _ = tx.send(value);
    }));
  }

  /// Drop the pending value, if any.
  pub fn cancel(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }

  pub fn is_pending(&self) -> bool {
    self.pending.as_ref().is_some_and(|h| !h.is_finished())
  }
}

impl<T> Drop for Debouncer<T> {
  fn drop(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_only_last_value_is_delivered() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = Debouncer::new(Duration::from_millis(30), tx);

    debouncer.schedule("a");
    debouncer.schedule("ap");
    debouncer.schedule("app");
    assert!(debouncer.is_pending());

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(rx.try_recv(), Ok("app"));
    assert!(rx.try_recv().is_err());
    assert!(!debouncer.is_pending());
  }

  #[tokio::test]
  async fn test_nothing_delivered_before_delay() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = Debouncer::new(Duration::from_millis(200), tx);

    debouncer.schedule(1);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(rx.try_recv().is_err());
    assert!(debouncer.is_pending());
  }

  #[tokio::test]
  async fn test_cancel_drops_pending_value() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = Debouncer::new(Duration::from_millis(20), tx);

    debouncer.schedule(1);
    debouncer.cancel();
    assert!(!debouncer.is_pending());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(rx.try_recv().is_err());
  }

  #[tokio::test]
  async fn test_separate_quiet_periods_each_deliver() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut debouncer = Debouncer::new(Duration::from_millis(20), tx);

    debouncer.schedule(1);
    tokio::time::sleep(Duration::from_millis(80)).await;
    debouncer.schedule(2);
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(rx.try_recv(), Ok(1));
    assert_eq!(rx.try_recv(), Ok(2));
  }
}
