mod create;
mod list;
mod read;
mod unread;

// Re-export handler functions for use in routing
pub use create::post as message_post;
pub use list::list as thread_messages;
pub use read::put as message_read;
pub use unread::get as unread_count;
