pub mod commands;
pub mod error;
pub mod repl;
pub mod session;

pub use commands::CliArgs;
pub use error::CliError;
pub use session::{Outcome, Session, SessionOptions};
