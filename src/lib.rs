// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. SinkKind in sink module
    clippy::must_use_candidate       // Annotated selectively on critical APIs
)]

pub mod app;
pub mod emitter;
pub mod options;
pub mod setup;
pub mod severity;
pub mod sink;

// Re-export main types for easy access
pub use emitter::{Emitter, Hook, SeverityFilter, TimestampStyle};
pub use options::OptionMap;
pub use setup::{SetupError, setup_logging};
pub use severity::Severity;
pub use sink::SinkKind;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
