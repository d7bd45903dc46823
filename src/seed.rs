use chrono::{DateTime, Utc};

use crate::models::{Project, Role, Task, TaskStatus, User};

/// One user per role.
pub fn seed_users() -> Vec<User> {
    vec![
        User::new("u1", "Admin Naval", Role::Admin),
        User::new("u2", "Manager Naval", Role::Manager),
        User::new("u3", "Dev Naval", Role::Developer),
    ]
}

/// A single project with two tasks already handed to the seeded Developer.
pub fn seed_projects(now: DateTime<Utc>) -> Vec<Project> {
    let mut layout = Task::new("t1", "Create UI layout", now);
    layout.assigned_to = Some("u3".to_string());

    let mut auth = Task::new("t2", "Fix auth bugs", now);
    auth.assigned_to = Some("u3".to_string());
    auth.status = TaskStatus::InProgress;

    let mut project = Project::new("p1", "Website Revamp", now);
    project.tasks = vec![layout, auth];
    vec![project]
}
