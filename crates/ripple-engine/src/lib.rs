//! Frame engine, disturbance queue, and background worker protocol for Ripple.
//!
//! [`WaveEngine`] runs one frame at a time: drain disturbances, sweep,
//! swap, colorize, and hand freshly allocated buffers to the caller.
//! [`EngineContext`] wraps it in the request/response lifecycle of the
//! engine protocol, and [`EngineWorker`] runs that context on a dedicated
//! background thread fed by a crossbeam channel.
//!
//! # Architecture
//!
//! ```text
//! Consumer (render loop)             Engine thread
//!     |                                  |
//!     |--send(Init)--------------------->| EngineContext::handle
//!     |<--Initialized--------------------|   WaveEngine::new(config)
//!     |--send(Disturb) / send(Reset)---->|   queue.enqueue(..)
//!     |--send(ReadyForNext)------------->|   drain -> sweep -> swap -> colorize
//!     |<--Frame(FrameResult)-------------|   buffers moved, not shared
//!     |  copy into meshes                |
//!     |--send(ReadyForNext)------------->|
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod context;
pub mod disturbance;
pub mod engine;
pub mod metrics;
pub mod protocol;
pub mod rain;
pub mod worker;

pub use codec::{decode_frame, decode_request, encode_frame, encode_request, CodecError};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use context::EngineContext;
pub use disturbance::{DisturbanceQueue, DrainReport};
pub use engine::{FramePhase, WaveEngine};
pub use metrics::SweepMetrics;
pub use protocol::{FrameResult, Request, Response};
pub use rain::RainGenerator;
pub use worker::{EngineWorker, ShutdownReport, WorkerError};
