//! Debounced values.
//!
//! A [`Debouncer`] republishes the last value pushed into it once no new value has arrived for
//! its delay. Every push restarts the wait, so a value that is superseded before the delay
//! elapses is never published. The timer lives in a background task that is aborted when the
//! debouncer is dropped.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<T>,
    delay: Duration,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Starts a debouncer publishing `initial` until the first value settles.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, receiver) = mpsc::unbounded_channel();
        let (publisher, output) = watch::channel(initial);
        let task = tokio::spawn(run(receiver, publisher, delay));
        Self {
            input,
            output,
            delay,
            task,
        }
    }

    /// Feeds a new value, restarting the wait.
    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            debug!("Debouncer task is gone, value dropped");
        }
    }

    /// The last settled value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// A receiver notified each time a value settles.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(mut input: mpsc::UnboundedReceiver<T>, publisher: watch::Sender<T>, delay: Duration) {
    let mut pending: Option<T> = None;
    let timer = sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            value = input.recv() => match value {
                Some(value) => {
                    trace!("Debounce restarted");
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                // Owner dropped: a still-pending value is discarded
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    publisher.send_replace(value);
                    trace!("Debounced value published");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_after_quiet_period() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        debouncer.push("Mouse".to_string());

        sleep(ms(299)).await;
        assert_eq!(debouncer.current(), "");

        sleep(ms(2)).await;
        assert_eq!(debouncer.current(), "Mouse");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_values_are_never_published() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        let mut settled = debouncer.subscribe();

        for text in ["M", "Mo", "Mou", "Mous", "Mouse"] {
            debouncer.push(text.to_string());
            sleep(ms(100)).await;
        }
        // 100ms after the last keystroke: nothing settled yet
        assert_eq!(debouncer.current(), "");
        assert!(!settled.has_changed().unwrap());

        sleep(ms(250)).await;
        assert!(settled.has_changed().unwrap());
        assert_eq!(*settled.borrow_and_update(), "Mouse");

        // exactly one publication happened
        sleep(ms(1000)).await;
        assert!(!settled.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_value() {
        let debouncer = Debouncer::new(0u32, DELAY);
        let mut settled = debouncer.subscribe();

        debouncer.push(7);
        sleep(ms(100)).await;
        drop(debouncer);

        sleep(ms(1000)).await;
        assert_eq!(*settled.borrow(), 0);
        // the publisher went away with the task
        assert!(settled.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_value_settles_again() {
        let debouncer = Debouncer::new(1u32, ms(50));
        debouncer.push(2);
        sleep(ms(60)).await;
        debouncer.push(2);
        sleep(ms(60)).await;
        assert_eq!(debouncer.current(), 2);
        assert_eq!(debouncer.delay(), ms(50));
    }
}
