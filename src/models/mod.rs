pub mod project;
pub mod task;
pub mod user;

pub use project::{Project, ProjectSummary};
pub use task::{Task, TaskStatus};
pub use user::{Role, User};
