pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{FeedbackAction, FeedbackRecord, ValidationError};
pub use repository::{FeedbackStore, Repository};
