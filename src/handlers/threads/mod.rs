mod by_user;
mod create;
mod delete;
mod list;
mod show;

// Re-export handler functions for use in routing
pub use by_user::list as thread_list_by_user;
pub use create::post as thread_post;
pub use delete::delete as thread_delete;
pub use list::list as thread_list;
pub use show::get as thread_get;
