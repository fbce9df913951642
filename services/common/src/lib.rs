//! Process plumbing shared by the relay services: tracing setup, typed
//! environment lookup, listener binding and shutdown handling.

mod env;
mod logging;
mod net;

pub use env::{env_or, env_opt};
pub use logging::{init_tracing, TracingGuards};
pub use net::{bind_listener, shutdown_signal};
