//! Adapter implementations of the mail dispatch port.

pub mod logging;
pub mod memory;

pub use logging::LoggingMailDispatcher;
pub use memory::RecordingMailDispatcher;
