pub mod error;

pub use error::StartupError;
