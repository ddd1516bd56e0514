//! Application services for Signals.

pub mod push;

pub use push::{PushOutcome, SigmaxPushService, is_signal_applicable};
