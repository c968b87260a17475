use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::model::Category;

/// How long a simulated rescan takes.
pub const REFRESH_DURATION: Duration = Duration::from_millis(1500);

const STEP: Duration = Duration::from_millis(50);

/// Messages sent from the refresh thread to the UI thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshMessage {
    Progress(u8),
    Finished,
    Cancelled,
}

/// A simulated rescan of one category running on a background thread.
///
/// It only waits and reports progress; the item list is not touched.
pub struct RefreshTask {
    category: Category,
    receiver: mpsc::Receiver<RefreshMessage>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    pub fn spawn(category: Category, duration: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<RefreshMessage>();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = std::thread::spawn(move || {
            let steps = (duration.as_millis() / STEP.as_millis()).max(1) as u32;
            let step = duration / steps;
            for n in 1..=steps {
                if flag.load(Ordering::Relaxed) {
                    let _ = tx.send(RefreshMessage::Cancelled);
                    return;
                }
                std::thread::sleep(step);
                let _ = tx.send(RefreshMessage::Progress((n * 100 / steps) as u8));
            }
            let _ = tx.send(if flag.load(Ordering::Relaxed) {
                RefreshMessage::Cancelled
            } else {
                RefreshMessage::Finished
            });
        });

        debug!("refresh of {category} started");
        Self {
            category,
            receiver: rx,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Ask the thread to stop at its next step.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Messages received so far, without blocking.
    pub fn drain(&self) -> Vec<RefreshMessage> {
        self.receiver.try_iter().collect()
    }

    /// Block until the task ends and return its final message.
    pub fn wait(mut self) -> RefreshMessage {
        let mut last = RefreshMessage::Cancelled;
        for message in self.receiver.iter() {
            last = message;
            if matches!(message, RefreshMessage::Finished | RefreshMessage::Cancelled) {
                break;
            }
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        last
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn completes_with_full_progress() {
        let task = RefreshTask::spawn(Category::Cache, Duration::from_millis(100));
        assert_eq!(task.category(), Category::Cache);
        assert_eq!(task.wait(), RefreshMessage::Finished);
    }

    #[test]
    fn progress_is_monotonic_and_ends_at_100() {
        let task = RefreshTask::spawn(Category::Logs, Duration::from_millis(200));
        let mut seen = Vec::new();
        loop {
            let batch = task.drain();
            let done = batch.contains(&RefreshMessage::Finished);
            seen.extend(batch);
            if done {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let progress: Vec<u8> = seen
            .iter()
            .filter_map(|m| match m {
                RefreshMessage::Progress(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(progress.last(), Some(&100));
    }

    #[test]
    fn cancel_stops_early() {
        let task = RefreshTask::spawn(Category::Trash, Duration::from_secs(30));
        task.cancel();
        let started = std::time::Instant::now();
        assert_eq!(task.wait(), RefreshMessage::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
