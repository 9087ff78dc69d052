//! Ready-made event listeners.

mod logging;

pub use logging::LoggingListener;
