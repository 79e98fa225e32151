pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskPriority, TaskUpdate};
pub use user::User;
