use std::fmt;

use crate::errors::{AppError, AppResult};
use crate::models::{Role, TaskStatus, User};

use super::lifecycle::{can_developer_transition, can_manager_set_status};

/// Everything a caller can ask the policy about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateProject,
    CreateTask,
    AssignTask,
    UpdateTaskStatus { current: TaskStatus, next: TaskStatus },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateProject => "create_project",
            Action::CreateTask => "create_task",
            Action::AssignTask => "assign_task",
            Action::UpdateTaskStatus { .. } => "update_task_status",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn has_role(user: Option<&User>, role: Role) -> bool {
    user.map(|u| u.has_role(role)).unwrap_or(false)
}

pub fn is_admin(user: Option<&User>) -> bool {
    has_role(user, Role::Admin)
}

pub fn is_manager(user: Option<&User>) -> bool {
    has_role(user, Role::Manager)
}

pub fn is_developer(user: Option<&User>) -> bool {
    has_role(user, Role::Developer)
}

pub fn can_create_project(user: Option<&User>) -> bool {
    is_admin(user)
}

pub fn can_create_task(user: Option<&User>) -> bool {
    is_manager(user)
}

pub fn can_assign_task(user: Option<&User>) -> bool {
    is_manager(user)
}

/// Checks `action` for `user`.
///
/// Evaluation order:
/// 1. no user -> `AuthenticationRequired`
/// 2. the action's own rule -> `Authorization` on failure
pub fn assert_allowed(user: Option<&User>, action: &Action) -> AppResult<()> {
    let Some(user) = user else {
        tracing::debug!(action = %action, "denied: no current user");
        return Err(AppError::authentication_required(format!(
            "Action \"{action}\" requires authentication"
        )));
    };

    let denial = match *action {
        Action::CreateProject => {
            (!can_create_project(Some(user))).then(|| "Only Admins can create projects".to_string())
        }
        Action::CreateTask => {
            (!can_create_task(Some(user))).then(|| "Only Managers can create tasks".to_string())
        }
        Action::AssignTask => {
            (!can_assign_task(Some(user))).then(|| "Only Managers can assign tasks".to_string())
        }
        Action::UpdateTaskStatus { current, next } => match user.role {
            Role::Developer => (!can_developer_transition(current, next)).then(|| {
                format!("Invalid status transition for Developer: {current} → {next}")
            }),
            Role::Manager => (!can_manager_set_status(next))
                .then(|| "Managers cannot set status to COMPLETED".to_string()),
            Role::Admin => Some("Admins cannot change task status".to_string()),
        },
    };

    match denial {
        Some(message) => {
            tracing::debug!(
                user_id = %user.id,
                role = %user.role,
                action = %action,
                reason = %message,
                "permission denied"
            );
            Err(AppError::authorization(message))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User::new("u1", "Admin Naval", Role::Admin)
    }

    fn manager() -> User {
        User::new("u2", "Manager Naval", Role::Manager)
    }

    fn developer() -> User {
        User::new("u3", "Dev Naval", Role::Developer)
    }

    #[test]
    fn role_predicates_need_a_user() {
        assert!(!is_admin(None));
        assert!(!is_manager(None));
        assert!(!is_developer(None));

        assert!(is_admin(Some(&admin())));
        assert!(!is_admin(Some(&manager())));
        assert!(is_manager(Some(&manager())));
        assert!(is_developer(Some(&developer())));
        assert!(!is_developer(Some(&admin())));
    }

    #[test]
    fn capabilities_follow_roles() {
        assert!(can_create_project(Some(&admin())));
        assert!(!can_create_project(Some(&manager())));
        assert!(!can_create_project(Some(&developer())));

        for user in [admin(), developer()] {
            assert!(!can_create_task(Some(&user)));
            assert!(!can_assign_task(Some(&user)));
        }
        assert!(can_create_task(Some(&manager())));
        assert!(can_assign_task(Some(&manager())));
    }

    #[test]
    fn missing_user_requires_authentication() {
        let actions = [
            Action::CreateProject,
            Action::CreateTask,
            Action::AssignTask,
            Action::UpdateTaskStatus {
                current: TaskStatus::Todo,
                next: TaskStatus::InProgress,
            },
        ];
        for action in actions {
            let err = assert_allowed(None, &action).unwrap_err();
            assert!(matches!(err, AppError::AuthenticationRequired(_)), "{action}");
            assert!(err.to_string().contains(action.name()));
        }
    }

    #[test]
    fn each_creation_action_has_exactly_one_role() {
        let cases = [
            (Action::CreateProject, Role::Admin),
            (Action::CreateTask, Role::Manager),
            (Action::AssignTask, Role::Manager),
        ];
        for (action, granted) in cases {
            for user in [admin(), manager(), developer()] {
                let result = assert_allowed(Some(&user), &action);
                if user.role == granted {
                    assert!(result.is_ok(), "{} should be allowed {action}", user.role);
                } else {
                    assert!(
                        matches!(result, Err(AppError::Authorization(_))),
                        "{} should be denied {action}",
                        user.role
                    );
                }
            }
        }
    }

    #[test]
    fn status_updates_follow_role_rules() {
        for current in TaskStatus::ALL {
            for next in TaskStatus::ALL {
                let action = Action::UpdateTaskStatus { current, next };

                let dev = assert_allowed(Some(&developer()), &action);
                assert_eq!(dev.is_ok(), can_developer_transition(current, next));

                let mgr = assert_allowed(Some(&manager()), &action);
                assert_eq!(mgr.is_ok(), next != TaskStatus::Completed);

                let adm = assert_allowed(Some(&admin()), &action).unwrap_err();
                assert_eq!(adm.to_string(), "forbidden: Admins cannot change task status");
            }
        }
    }

    #[test]
    fn developer_denial_names_both_states() {
        let action = Action::UpdateTaskStatus {
            current: TaskStatus::Todo,
            next: TaskStatus::Review,
        };
        let err = assert_allowed(Some(&developer()), &action).unwrap_err();
        assert_eq!(
            err.to_string(),
            "forbidden: Invalid status transition for Developer: TODO → REVIEW"
        );
    }
}
