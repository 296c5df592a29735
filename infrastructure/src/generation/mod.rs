//! Response generator adapters.

mod logging_generator;

pub use logging_generator::LoggingResponseGenerator;
