use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Creation order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Counts shown on a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub task_count: usize,
    pub completed_count: usize,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: now,
            tasks: Vec::new(),
        }
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            task_count: self.tasks.len(),
            completed_count: self
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
        }
    }

    /// Case-insensitive substring match on the project name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_completed_tasks() {
        let now = Utc::now();
        let mut project = Project::new("p1", "Website Revamp", now);
        project.tasks.push(Task::new("t1", "Create UI layout", now));
        let mut done = Task::new("t2", "Fix auth bugs", now);
        done.status = TaskStatus::Completed;
        project.tasks.push(done);

        let summary = project.summary();
        assert_eq!(summary.task_count, 2);
        assert_eq!(summary.completed_count, 1);
    }

    #[test]
    fn matches_ignores_case() {
        let project = Project::new("p1", "Website Revamp", Utc::now());
        assert!(project.matches("revamp"));
        assert!(project.matches(""));
        assert!(!project.matches("launch"));
    }
}
