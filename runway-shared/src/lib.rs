pub mod models;
pub mod pii;

pub use models::events::{LedgerEvent, LedgerEventKind};
pub use pii::Masked;
