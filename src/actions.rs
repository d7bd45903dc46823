//! Caller-side entry points for the task table.
//!
//! These sit in front of the repository and apply the guards the policy
//! cannot see, mainly that a Developer may only move tasks assigned to them.

use crate::authz::{can_developer_transition, can_manager_set_status, is_developer, is_manager, Session};
use crate::errors::{AppError, AppResult};
use crate::models::{Task, TaskStatus, User};
use crate::repository::Repository;

/// The three workflow buttons offered to the assigned Developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeveloperAction {
    Start,
    End,
    Complete,
}

impl DeveloperAction {
    pub const ALL: [DeveloperAction; 3] = [
        DeveloperAction::Start,
        DeveloperAction::End,
        DeveloperAction::Complete,
    ];

    pub fn target_status(self) -> TaskStatus {
        match self {
            DeveloperAction::Start => TaskStatus::InProgress,
            DeveloperAction::End => TaskStatus::Review,
            DeveloperAction::Complete => TaskStatus::Completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeveloperAction::Start => "Start",
            DeveloperAction::End => "End",
            DeveloperAction::Complete => "Complete",
        }
    }
}

/// True when `user` is a Developer and the task is assigned to them.
pub fn is_assignee(user: Option<&User>, task: &Task) -> bool {
    match user {
        Some(user) => is_developer(Some(user)) && task.is_assigned_to(&user.id),
        None => false,
    }
}

/// Actions currently enabled for `user` on `task`. Empty for anyone but the assignee.
pub fn available_developer_actions(user: Option<&User>, task: &Task) -> Vec<DeveloperAction> {
    if !is_assignee(user, task) {
        return Vec::new();
    }
    DeveloperAction::ALL
        .into_iter()
        .filter(|action| can_developer_transition(task.status, action.target_status()))
        .collect()
}

pub fn perform_developer_action(
    repo: &mut Repository,
    session: &Session,
    project_id: &str,
    task_id: &str,
    action: DeveloperAction,
) -> AppResult<Task> {
    let Some(user) = session.user() else {
        return Err(AppError::authentication_required(format!(
            "Action \"{}\" requires authentication",
            action.label()
        )));
    };
    if !is_developer(Some(user)) {
        return Err(AppError::authorization("Only Developers can perform workflow actions"));
    }

    let owned = {
        let project = repo
            .get_project_by_id(project_id)
            .ok_or_else(|| AppError::not_found(format!("Project with id \"{project_id}\" not found")))?;
        let task = project
            .find_task(task_id)
            .ok_or_else(|| AppError::not_found(format!("Task with id \"{task_id}\" not found")))?;
        task.is_assigned_to(&user.id)
    };

    if !owned {
        tracing::debug!(
            user_id = %user.id,
            task_id = %task_id,
            action = action.label(),
            "blocked: not the assignee"
        );
        return Err(AppError::authorization(
            "Only the assigned Developer can update this task",
        ));
    }

    repo.update_task_status(session, project_id, task_id, action.target_status())
}

pub fn set_status_as_manager(
    repo: &mut Repository,
    session: &Session,
    project_id: &str,
    task_id: &str,
    status: TaskStatus,
) -> AppResult<Task> {
    if !session.is_authenticated() {
        return Err(AppError::authentication_required(
            "Action \"set_status\" requires authentication",
        ));
    }
    if !is_manager(session.user()) {
        return Err(AppError::authorization("Only Managers can set task status directly"));
    }
    if !can_manager_set_status(status) {
        return Err(AppError::authorization("Managers cannot set status to COMPLETED"));
    }

    repo.update_task_status(session, project_id, task_id, status)
}
