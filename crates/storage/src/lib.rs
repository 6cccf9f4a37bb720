pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use database::Database;
pub use store::{Document, DocumentStore, InMemoryDocumentStore, Page, StoredDocument};
