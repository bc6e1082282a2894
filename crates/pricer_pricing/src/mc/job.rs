//! Background execution of Monte Carlo pricing calls.
//!
//! [`PricingJob::spawn`] moves a pricer onto a named worker thread and
//! hands back a job that can be polled, waited on with or without a
//! timeout, or cancelled. [`PricingJob::spawn_with_callback`] delivers the
//! result to a completion callback instead.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pricer_models::instruments::OptionSpec;

use super::error::McError;
use super::monitor::CancellationToken;
use super::pricer::{MonteCarloPricer, PricingResult};

/// Result delivered by a background pricing call.
pub type JobResult = Result<PricingResult, McError>;

const JOB_THREAD_NAME: &str = "pricer-job";

fn spawn_worker<F>(
    pricer: MonteCarloPricer,
    spec: OptionSpec,
    deliver: F,
) -> Result<JoinHandle<()>, McError>
where
    F: FnOnce(JobResult) + Send + 'static,
{
    thread::Builder::new()
        .name(JOB_THREAD_NAME.to_string())
        .spawn(move || {
            tracing::debug!(kind = spec.kind(), "pricing job started");
            deliver(pricer.price(&spec));
        })
        .map_err(|err| McError::ThreadPool(err.to_string()))
}

/// Handle to a pricing call running on a background thread.
///
/// The result can be taken exactly once, by whichever of
/// [`wait`](Self::wait), [`wait_timeout`](Self::wait_timeout) or
/// [`try_result`](Self::try_result) first observes it.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer, PricingJob};
/// use pricer_models::instruments::{AsianOption, OptionType, Underlying};
///
/// let option = AsianOption::new(
///     Underlying::new(100.0, 0.3).unwrap(), 0.05, 3.0, 100.0, 50, OptionType::Call,
/// ).unwrap();
/// let config = MonteCarloConfig::builder().n_trials(1000).seed(7).build().unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let job = PricingJob::spawn(pricer, option.into()).unwrap();
/// let result = job.wait().unwrap();
/// assert_eq!(result.n_trials, 1000);
/// ```
#[derive(Debug)]
pub struct PricingJob {
    receiver: Receiver<JobResult>,
    cancellation: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PricingJob {
    /// Starts pricing `spec` with `pricer` on a background thread.
    ///
    /// # Errors
    ///
    /// `McError::ThreadPool` if the thread cannot be spawned.
    pub fn spawn(pricer: MonteCarloPricer, spec: OptionSpec) -> Result<Self, McError> {
        let cancellation = pricer.cancellation_token();
        let (sender, receiver) = mpsc::channel();
        let handle = spawn_worker(pricer, spec, move |result| {
            // The job may have been dropped; nobody is left to tell.
            let _ = sender.send(result);
        })?;

        Ok(Self {
            receiver,
            cancellation,
            handle: Some(handle),
        })
    }

    /// Starts pricing `spec` on a background thread and passes the result
    /// to `on_complete` from that thread.
    ///
    /// Returns the token that cancels the call.
    ///
    /// # Errors
    ///
    /// `McError::ThreadPool` if the thread cannot be spawned.
    pub fn spawn_with_callback<F>(
        pricer: MonteCarloPricer,
        spec: OptionSpec,
        on_complete: F,
    ) -> Result<CancellationToken, McError>
    where
        F: FnOnce(JobResult) + Send + 'static,
    {
        let cancellation = pricer.cancellation_token();
        spawn_worker(pricer, spec, on_complete)?;
        Ok(cancellation)
    }

    /// Requests cancellation; the worker stops before its next chunk.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns the token observed by the worker.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Returns `true` once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |handle| handle.is_finished())
    }

    /// Returns the result if it is ready, without blocking.
    pub fn try_result(&self) -> Option<JobResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(McError::WorkerDisconnected)),
        }
    }

    /// Blocks for at most `timeout` waiting for the result.
    ///
    /// Returns `None` if the deadline passes first; the job keeps running.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<JobResult> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(McError::WorkerDisconnected)),
        }
    }

    /// Blocks until the result is available.
    ///
    /// # Errors
    ///
    /// The pricing error, or `McError::WorkerDisconnected` if the worker
    /// ended without a result (for instance after a panic or after the
    /// result was already taken).
    pub fn wait(mut self) -> JobResult {
        let result = self
            .receiver
            .recv()
            .map_err(|_| McError::WorkerDisconnected)?;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("pricing job thread panicked after delivering its result");
            }
        }
        result
    }
}
