pub mod task;
pub mod user;

pub use task::{Task, TaskPayload, TaskStatus};
pub use user::{PublicUser, User};
