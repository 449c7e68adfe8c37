pub mod status;
pub mod transaction;

pub use status::{Status, StatusName};
pub use transaction::Transaction;
