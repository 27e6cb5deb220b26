pub mod manager;
pub mod messages;
pub mod models;
pub mod threads;

pub use manager::{DatabaseError, DatabaseManager};
pub use messages::MessageRepository;
pub use threads::ThreadRepository;
