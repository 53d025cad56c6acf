//! gazelink is a capture-and-relay client: it samples frames from a camera
//! source at a fixed cadence, encodes them as JPEG data URLs and pushes them
//! over a persistent WebSocket connection to a remote gaze/attention
//! inference service, then forwards the returned classifications to a
//! presenter. The connection is best-effort: any disconnect schedules a
//! single fixed-delay reconnect attempt, indefinitely.

pub mod capture;
pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod presenter;
pub mod types;
