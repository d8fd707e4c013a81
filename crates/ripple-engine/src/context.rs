//! Request handling and the engine lifecycle.

use crate::config::EngineConfig;
use crate::disturbance::DisturbanceQueue;
use crate::engine::WaveEngine;
use crate::protocol::{Request, Response};

/// Lifecycle state of an [`EngineContext`].
enum State {
    /// No grid yet. Disturbances are buffered up to
    /// [`EngineContext::PENDING_LIMIT`].
    Uninitialized { pending: DisturbanceQueue },
    /// Grid built; frames on demand.
    Running(Box<WaveEngine>),
}

/// Drives a [`WaveEngine`] from protocol requests.
///
/// `Init` is accepted exactly once. `Disturb` and `Reset` are accepted
/// at any time and buffered until the next frame. `ReadyForNext` before
/// `Init` is logged and ignored. Requests are handled one at a time, so a
/// `ReadyForNext` that arrives while a frame is being computed waits for
/// that frame and then produces the next one.
pub struct EngineContext {
    state: State,
    ignored: u64,
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineContext {
    /// Distinct pushes buffered before `Init`. Further pushes are ignored.
    pub const PENDING_LIMIT: usize = DisturbanceQueue::DEFAULT_CAPACITY;

    /// A context awaiting `Init`.
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized {
                pending: DisturbanceQueue::with_capacity(Self::PENDING_LIMIT),
            },
            ignored: 0,
        }
    }

    /// Process one request, returning the reply if it has one.
    pub fn handle(&mut self, request: Request) -> Option<Response> {
        match request {
            Request::Init(params) => self.init(EngineConfig::from_init(params)),
            Request::Disturb { tile, cell } => {
                match &mut self.state {
                    State::Running(engine) => {
                        engine.disturb(tile, cell);
                    }
                    State::Uninitialized { pending } => {
                        if !pending.enqueue_push(tile, cell) {
                            if pending.dropped() == 0 {
                                log::warn!("pre-Init disturbance buffer full, dropping pushes");
                            }
                            pending.record_dropped(1);
                            self.ignored += 1;
                        }
                    }
                }
                None
            }
            Request::Reset => {
                log::debug!("reset requested");
                match &mut self.state {
                    State::Running(engine) => engine.reset(),
                    State::Uninitialized { pending } => pending.enqueue_reset(),
                }
                None
            }
            Request::ReadyForNext => match &mut self.state {
                State::Running(engine) => Some(Response::Frame(engine.step())),
                State::Uninitialized { .. } => {
                    log::warn!("ReadyForNext before Init, ignored");
                    self.ignored += 1;
                    None
                }
            },
        }
    }

    fn init(&mut self, config: EngineConfig) -> Option<Response> {
        let pending = match &mut self.state {
            State::Running(_) => {
                log::warn!("duplicate Init, ignored");
                self.ignored += 1;
                return None;
            }
            State::Uninitialized { pending } => pending,
        };
        match WaveEngine::new(config) {
            Ok(mut engine) => {
                engine.take_pending(std::mem::take(pending));
                let cell_count = engine.grid().topology().cell_count();
                self.state = State::Running(Box::new(engine));
                Some(Response::Initialized { cell_count })
            }
            Err(e) => {
                log::warn!("Init refused: {e}");
                Some(Response::InitFailed(e))
            }
        }
    }

    /// Whether `Init` has succeeded.
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// The engine, once initialized.
    pub fn engine(&self) -> Option<&WaveEngine> {
        match &self.state {
            State::Running(engine) => Some(&**engine),
            State::Uninitialized { .. } => None,
        }
    }

    /// Disturbances buffered before `Init`, or pending in the engine.
    pub fn pending(&self) -> &DisturbanceQueue {
        match &self.state {
            State::Uninitialized { pending } => pending,
            State::Running(engine) => engine.queue(),
        }
    }

    /// Requests dropped as protocol violations.
    pub fn ignored_requests(&self) -> u64 {
        self.ignored
    }
}
