//! Background engine thread and its consumer-side handle.
//!
//! The engine thread owns an [`EngineContext`] exclusively (moved in via
//! `thread::spawn`). Requests arrive on an unbounded crossbeam channel and
//! are handled strictly in arrival order; replies go back on a second
//! channel. There are no locks: the thread blocks only on its inbox and
//! exits when the handle drops its sender.

use std::error::Error;
use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::codec::decode_request;
use crate::context::EngineContext;
use crate::protocol::{Request, Response};

/// What crosses into the engine thread.
enum Inbound {
    Request(Request),
    Encoded(Vec<u8>),
}

/// Counters the engine thread hands back when it exits.
#[derive(Clone, Copy, Debug, Default)]
struct ThreadSummary {
    frames: u64,
    ignored: u64,
}

/// Errors from the worker handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkerError {
    /// The engine thread has stopped; nothing more can be sent or received.
    Shutdown,
    /// No response arrived within the requested timeout.
    Timeout,
    /// The operating system refused to start the engine thread.
    Spawn {
        /// The underlying I/O error, rendered.
        reason: String,
    },
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "engine thread has shut down"),
            Self::Timeout => write!(f, "timed out waiting for the engine"),
            Self::Spawn { reason } => write!(f, "failed to spawn engine thread: {reason}"),
        }
    }
}

impl Error for WorkerError {}

/// Report returned by [`EngineWorker::shutdown`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Time spent in the shutdown sequence.
    pub total_ms: u64,
    /// Whether the engine thread was joined cleanly.
    pub joined: bool,
    /// Frames the engine produced over its lifetime.
    pub frames: u64,
    /// Requests the engine dropped as protocol violations or undecodable.
    pub ignored: u64,
}

/// Handle to an engine running on its own thread.
///
/// Dropping the handle shuts the thread down and joins it.
pub struct EngineWorker {
    inbox: Option<Sender<Inbound>>,
    outbox: Receiver<Response>,
    thread: Option<JoinHandle<ThreadSummary>>,
}

impl EngineWorker {
    /// Start an uninitialized engine on a thread named `ripple-engine`.
    pub fn spawn() -> Result<Self, WorkerError> {
        let (in_tx, in_rx) = crossbeam_channel::unbounded::<Inbound>();
        let (out_tx, out_rx) = crossbeam_channel::unbounded::<Response>();
        let thread = thread::Builder::new()
            .name("ripple-engine".into())
            .spawn(move || run(in_rx, out_tx))
            .map_err(|e| WorkerError::Spawn {
                reason: e.to_string(),
            })?;
        log::debug!("engine thread started");
        Ok(Self {
            inbox: Some(in_tx),
            outbox: out_rx,
            thread: Some(thread),
        })
    }

    /// Queue a request for the engine.
    pub fn send(&self, request: Request) -> Result<(), WorkerError> {
        self.push(Inbound::Request(request))
    }

    /// Queue a codec-framed request. Frames that fail to decode are logged
    /// and dropped on the engine thread.
    pub fn send_encoded(&self, bytes: Vec<u8>) -> Result<(), WorkerError> {
        self.push(Inbound::Encoded(bytes))
    }

    fn push(&self, msg: Inbound) -> Result<(), WorkerError> {
        let inbox = self.inbox.as_ref().ok_or(WorkerError::Shutdown)?;
        inbox.send(msg).map_err(|_| WorkerError::Shutdown)
    }

    /// Block until the next response.
    pub fn recv(&self) -> Result<Response, WorkerError> {
        self.outbox.recv().map_err(|_| WorkerError::Shutdown)
    }

    /// Block until the next response or `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Response, WorkerError> {
        self.outbox.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => WorkerError::Timeout,
            RecvTimeoutError::Disconnected => WorkerError::Shutdown,
        })
    }

    /// The next response if one is ready.
    pub fn try_recv(&self) -> Option<Response> {
        match self.outbox.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Whether the engine thread is still accepting requests.
    pub fn is_running(&self) -> bool {
        self.inbox.is_some()
    }

    /// Stop the engine thread and join it. Requests already queued are
    /// handled first. Calling this twice is harmless.
    pub fn shutdown(&mut self) -> ShutdownReport {
        let start = Instant::now();
        // Closing the inbox ends the thread's receive loop.
        self.inbox = None;

        let (joined, summary) = match self.thread.take() {
            Some(handle) => match handle.join() {
                Ok(summary) => (true, summary),
                Err(_) => {
                    log::warn!("engine thread panicked");
                    (false, ThreadSummary::default())
                }
            },
            None => (true, ThreadSummary::default()),
        };

        let report = ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            joined,
            frames: summary.frames,
            ignored: summary.ignored,
        };
        log::debug!("engine thread stopped: {report:?}");
        report
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.shutdown();
        }
    }
}

/// Engine thread body.
fn run(inbox: Receiver<Inbound>, outbox: Sender<Response>) -> ThreadSummary {
    let mut ctx = EngineContext::new();
    let mut undecodable = 0u64;

    while let Ok(msg) = inbox.recv() {
        let request = match msg {
            Inbound::Request(r) => r,
            Inbound::Encoded(bytes) => match decode_request(&bytes) {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("dropping undecodable request: {e}");
                    undecodable += 1;
                    continue;
                }
            },
        };
        if let Some(response) = ctx.handle(request) {
            if outbox.send(response).is_err() {
                break;
            }
        }
    }

    ThreadSummary {
        frames: ctx.engine().map_or(0, |e| e.current_frame().0),
        ignored: ctx.ignored_requests() + undecodable,
    }
}
