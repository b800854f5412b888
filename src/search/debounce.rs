use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Emitted when a value survived the debounce window without being replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub generation: u64,
    pub value: String,
}

/// Restartable one-shot timer. Each `schedule` aborts the pending timer and
/// starts a new one; only a timer that runs to completion emits.
pub struct Debouncer<E> {
    delay: Duration,
    tx: mpsc::UnboundedSender<E>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl<E> Debouncer<E>
where
    E: From<Settled> + Send + 'static,
{
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<E>) -> Self {
        Self {
            delay,
            tx,
            generation: 0,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: String) {
        self.cancel();
        self.generation += 1;

        let settled = Settled {
            generation: self.generation,
            value,
        };
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(settled.into());
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// A settle event may already be queued when a newer keystroke arrives;
    /// only the newest generation counts.
    pub fn is_current(&self, settled: &Settled) -> bool {
        settled.generation == self.generation
    }
}

impl<E> Drop for Debouncer<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn only_last_value_settles() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Settled>();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.schedule("o".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("oc".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("oct".to_string());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err(), "nothing before the window closes");

        tokio::time::sleep(Duration::from_millis(2)).await;
        let settled = rx.recv().await.unwrap();
        assert_eq!(settled.value, "oct");
        assert!(debouncer.is_current(&settled));
        assert!(rx.try_recv().is_err(), "cancelled timers never fire");
    }

    #[tokio::test(start_paused = true)]
    async fn queued_event_from_older_generation_is_not_current() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Settled>();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.schedule("oc".to_string());
        tokio::time::sleep(DELAY * 2).await;
        let settled = rx.recv().await.unwrap();

        debouncer.schedule("oct".to_string());
        assert!(!debouncer.is_current(&settled));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Settled>();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.schedule("octo".to_string());
        debouncer.cancel();
        tokio::time::sleep(DELAY * 2).await;

        assert!(rx.try_recv().is_err());
    }
}
