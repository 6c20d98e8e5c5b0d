use anyhow::Result;
use log::{debug, error, info, warn};
use std::future::Future;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::{interval, Instant, MissedTickBehavior};

/// Runs a job immediately and then on a fixed period until stopped.
/// Errors from a run are logged and the schedule continues.
pub struct PollingTask {
    name: String,
    period: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
}

impl PollingTask {
    pub fn new(name: impl Into<String>, period: Duration) -> Self {
        Self {
            name: name.into(),
            period,
            stop_tx: None,
        }
    }

    // Start the background loop. Calling start on a running task is a no-op.
    pub fn start<F, Fut>(&mut self, mut job: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        if self.stop_tx.is_some() {
            warn!("{} poller is already running", self.name);
            return;
        }

        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        self.stop_tx = Some(stop_tx);

        let name = self.name.clone();
        let period = self.period;

        tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_run: Option<Instant> = None;

            loop {
                select! {
                    _ = interval.tick() => {
                        if let Some(last) = last_run {
                            debug!("Running {} poll (last run: {:.2?} ago)", name, last.elapsed());
                        }

                        if let Err(e) = job().await {
                            error!("Error in {} poll: {}", name, e);
                        }

                        last_run = Some(Instant::now());
                    }
                    // A dropped sender also ends the loop
                    _ = stop_rx.recv() => {
                        info!("Stopping {} poller", name);
                        break;
                    }
                }
            }
        });

        info!("{} poller started, every {:?}", self.name, self.period);
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
            debug!("{} poller stop signal sent", self.name);
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn counting_job(count: Arc<AtomicUsize>, fail: bool) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<()>> + Send>> {
        move || {
            let count = count.clone();
            Box::pin(async move {
                count.fetch_add(1, Ordering::SeqCst);
                if fail {
                    Err(anyhow!("upstream unavailable"))
                } else {
                    Ok(())
                }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_at_start_and_every_period_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut task = PollingTask::new("test", Duration::from_secs(30));
        task.start(counting_job(count.clone(), false));
        assert!(task.is_running());

        sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        task.stop().await;
        assert!(!task.is_running());

        sleep(Duration::from_secs(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_polling_after_errors() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut task = PollingTask::new("failing", Duration::from_secs(2));
        task.start(counting_job(count.clone(), true));

        sleep(Duration::from_millis(6_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 4);
        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_ignored() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut task = PollingTask::new("once", Duration::from_secs(10));
        task.start(counting_job(count.clone(), false));
        task.start(counting_job(count.clone(), false));

        sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        task.stop().await;
    }
}
