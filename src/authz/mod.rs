//! Authorization module - role policy and task lifecycle
//!
//! This module implements the role-based rules for:
//! - Which role may create projects, create tasks and assign tasks
//! - The Developer status walk (TODO -> IN_PROGRESS -> REVIEW -> COMPLETED)
//! - The Manager status overwrite (anything but COMPLETED)
//!
//! Everything here is a pure function of the acting user and the action.
//! Assignment ownership is not visible to the policy; see `crate::actions`.

mod lifecycle;
mod policy;
mod session;

pub use lifecycle::{can_developer_transition, can_manager_set_status, MANAGER_STATUS_OPTIONS};
pub use policy::{
    assert_allowed, can_assign_task, can_create_project, can_create_task, is_admin, is_developer,
    is_manager, Action,
};
pub use session::Session;
