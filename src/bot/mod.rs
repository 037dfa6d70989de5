/// Command and link-submission handlers
pub mod handlers;
