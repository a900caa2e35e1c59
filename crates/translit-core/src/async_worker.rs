use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::transliterate::{Options, TransliterateError, Transliterator};

type JobResult = Result<String, TransliterateError>;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Shared cancellation flag.
///
/// Checked before a job starts and after it finishes. A running
/// substitution pass is never interrupted, so a cancelled job never yields a
/// partial result.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

struct Job {
    text: String,
    options: Options,
    custom: Option<HashMap<String, String>>,
    cancel: CancellationToken,
    reply: mpsc::Sender<JobResult>,
}

/// Handle to a submitted job.
pub struct PendingResult {
    rx: mpsc::Receiver<JobResult>,
    cancel: CancellationToken,
}

impl PendingResult {
    /// Block until the job finishes. A worker that went away before replying
    /// reports `Cancelled`.
    pub fn wait(self) -> JobResult {
        self.rx
            .recv()
            .unwrap_or(Err(TransliterateError::Cancelled))
    }

    /// Non-blocking poll. `None` while the job is still queued or running.
    pub fn try_get(&self) -> Option<JobResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(TransliterateError::Cancelled)),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

// ---------------------------------------------------------------------------
// TransliterationWorker
// ---------------------------------------------------------------------------

/// Runs transliteration jobs on a dedicated background thread.
pub struct TransliterationWorker {
    tx: Option<mpsc::Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl TransliterationWorker {
    pub fn new(engine: Transliterator) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name("translit-worker".into())
            .spawn(move || worker_loop(rx, engine))?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue a job. Validation happens on the worker, exactly as for a
    /// synchronous call.
    pub fn submit(
        &self,
        text: impl Into<String>,
        options: Options,
        custom: Option<HashMap<String, String>>,
        cancel: Option<CancellationToken>,
    ) -> PendingResult {
        let cancel = cancel.unwrap_or_default();
        let (reply, rx) = mpsc::channel();
        let job = Job {
            text: text.into(),
            options,
            custom,
            cancel: cancel.clone(),
            reply,
        };
        if let Some(ref tx) = self.tx {
            // A send error drops the reply sender, which `wait` reports as
            // cancellation.
            let _ = tx.send(job);
        }
        PendingResult { rx, cancel }
    }
}

impl Drop for TransliterationWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once the queue drains.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn worker_loop(rx: mpsc::Receiver<Job>, engine: Transliterator) {
    while let Ok(job) = rx.recv() {
        if job.cancel.is_cancelled() {
            debug!("job cancelled before start");
            let _ = job.reply.send(Err(TransliterateError::Cancelled));
            continue;
        }

        let result = engine.run(&job.text, job.options, job.custom.as_ref());

        // Check again after the pass; the result is discarded whole.
        let result = if job.cancel.is_cancelled() {
            debug!("job cancelled while running");
            Err(TransliterateError::Cancelled)
        } else {
            result
        };
        let _ = job.reply.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizationMode;

    fn worker() -> TransliterationWorker {
        TransliterationWorker::new(Transliterator::builtin()).unwrap()
    }

    #[test]
    fn test_submit_and_wait() {
        let w = worker();
        let pending = w.submit("Fußgänger", Options::default(), None, None);
        assert_eq!(pending.wait().unwrap(), "Fussgaenger");
    }

    #[test]
    fn test_cancelled_before_start() {
        let w = worker();
        let token = CancellationToken::new();
        token.cancel();
        let pending = w.submit("Fußgänger", Options::default(), None, Some(token));
        assert_eq!(pending.wait(), Err(TransliterateError::Cancelled));
    }

    #[test]
    fn test_errors_propagate() {
        let w = worker();
        let pending = w.submit("   ", Options::default(), None, None);
        assert_eq!(pending.wait(), Err(TransliterateError::InvalidInput));
    }

    #[test]
    fn test_custom_mapping_is_moved_into_job() {
        let w = worker();
        let custom: HashMap<String, String> =
            [("e".to_string(), "x".to_string())].into_iter().collect();
        let options = Options {
            mode: NormalizationMode::Decompose,
            use_default_mapping: true,
        };
        let pending = w.submit("ee", options, Some(custom), None);
        assert_eq!(pending.wait().unwrap(), "xx");
    }

    #[test]
    fn test_jobs_complete_in_order() {
        let w = worker();
        let pending: Vec<PendingResult> = ["ä", "ö", "ü"]
            .iter()
            .map(|t| w.submit(*t, Options::default(), None, None))
            .collect();
        let results: Vec<String> = pending.into_iter().map(|p| p.wait().unwrap()).collect();
        assert_eq!(results, vec!["ae", "oe", "ue"]);
    }

    #[test]
    fn test_try_get_eventually_ready() {
        let w = worker();
        let pending = w.submit("ß", Options::default(), None, None);
        let result = loop {
            if let Some(r) = pending.try_get() {
                break r;
            }
            thread::yield_now();
        };
        assert_eq!(result.unwrap(), "ss");
    }

    #[test]
    fn test_drop_joins_worker() {
        let w = worker();
        let pending = w.submit("ß", Options::default(), None, None);
        drop(w);
        // The queue drains before the thread exits.
        assert_eq!(pending.wait().unwrap(), "ss");
    }

    #[test]
    fn test_token_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
