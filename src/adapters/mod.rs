//! Concrete implementations of the ports.

#[cfg(test)]
pub mod memory;
pub mod postgres_status_repository;
pub mod postgres_transaction_store;
pub mod redis_document_mirror;
pub mod redis_notifier;

pub use postgres_status_repository::PostgresStatusRepository;
pub use postgres_transaction_store::PostgresTransactionStore;
pub use redis_document_mirror::RedisDocumentMirror;
pub use redis_notifier::RedisNotifier;
