pub mod status;
pub mod transaction;

pub use status::StatusService;
pub use transaction::TransactionService;
