use crate::models::TaskStatus;

/// Statuses a Manager may pick. Everything except COMPLETED.
pub const MANAGER_STATUS_OPTIONS: [TaskStatus; 4] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Review,
    TaskStatus::NotCompleted,
];

impl TaskStatus {
    /// The single status a Developer may move to from here, if any.
    ///
    /// TODO -> IN_PROGRESS -> REVIEW -> COMPLETED. COMPLETED and
    /// NOT_COMPLETED are terminal on this path.
    pub fn developer_successor(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Todo => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Review),
            TaskStatus::Review => Some(TaskStatus::Completed),
            TaskStatus::Completed | TaskStatus::NotCompleted => None,
        }
    }

    pub fn is_initial(self) -> bool {
        self == TaskStatus::Todo
    }
}

/// Strict one-step progression; identity pairs and skips are rejected.
pub fn can_developer_transition(current: TaskStatus, next: TaskStatus) -> bool {
    current.developer_successor() == Some(next)
}

/// Managers overwrite status directly, but may not mark work done.
pub fn can_manager_set_status(status: TaskStatus) -> bool {
    status != TaskStatus::Completed
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGAL: [(TaskStatus, TaskStatus); 3] = [
        (TaskStatus::Todo, TaskStatus::InProgress),
        (TaskStatus::InProgress, TaskStatus::Review),
        (TaskStatus::Review, TaskStatus::Completed),
    ];

    #[test]
    fn developer_transitions_are_exactly_the_linear_walk() {
        let mut allowed = 0;
        for current in TaskStatus::ALL {
            for next in TaskStatus::ALL {
                let expected = LEGAL.contains(&(current, next));
                assert_eq!(
                    can_developer_transition(current, next),
                    expected,
                    "{current} -> {next}"
                );
                if expected {
                    allowed += 1;
                }
            }
        }
        assert_eq!(allowed, 3);
    }

    #[test]
    fn identity_and_skips_are_rejected() {
        for status in TaskStatus::ALL {
            assert!(!can_developer_transition(status, status));
        }
        assert!(!can_developer_transition(TaskStatus::Todo, TaskStatus::Review));
        assert!(!can_developer_transition(TaskStatus::Todo, TaskStatus::Completed));
        assert!(!can_developer_transition(TaskStatus::Review, TaskStatus::InProgress));
        assert!(!can_developer_transition(TaskStatus::NotCompleted, TaskStatus::Todo));
    }

    #[test]
    fn managers_may_set_anything_but_completed() {
        for status in TaskStatus::ALL {
            assert_eq!(can_manager_set_status(status), status != TaskStatus::Completed);
        }
        assert!(MANAGER_STATUS_OPTIONS.iter().all(|s| can_manager_set_status(*s)));
        assert_eq!(MANAGER_STATUS_OPTIONS.len(), TaskStatus::ALL.len() - 1);
    }

    #[test]
    fn only_todo_is_initial() {
        let initial: Vec<_> = TaskStatus::ALL.into_iter().filter(|s| s.is_initial()).collect();
        assert_eq!(initial, vec![TaskStatus::Todo]);
    }
}
