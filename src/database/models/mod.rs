pub mod feedback;

pub use feedback::{FeedbackAction, FeedbackRecord, ValidationError, REQUIRED_FIELDS};
