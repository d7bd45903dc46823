//! In-memory owner of users, projects and tasks.
//!
//! The repository never decides whether something is allowed; it asks
//! `crate::authz` and only then swaps in a rebuilt project list and writes
//! the snapshot to storage.

use std::sync::Arc;

use crate::authz::{assert_allowed, Action, Session};
use crate::errors::{AppError, AppResult};
use crate::models::{Project, Role, Task, TaskStatus, User};
use crate::seed::{seed_projects, seed_users};
use crate::storage::{get_item, keys, remove_item, set_item, try_get_item, Storage};
use crate::utils::{generate_id, require_text, utc_now};

pub struct Repository {
    storage: Arc<dyn Storage>,
    users: Vec<User>,
    projects: Vec<Project>,
    persisted_user: Option<User>,
    /// Set when a stored collection exists but could not be decoded.
    unreadable: bool,
}

/// Absent records load as empty; undecodable ones are logged and flagged.
fn load_collection<T: serde::de::DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    unreadable: &mut bool,
) -> Vec<T> {
    match try_get_item::<Vec<T>>(storage, key) {
        Ok(items) => items.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "stored collection is unreadable, leaving it as is");
            *unreadable = true;
            Vec::new()
        }
    }
}

impl Repository {
    /// Loads the stored snapshot, seeding it when users or projects are missing.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let mut unreadable = false;
        let users: Vec<User> = load_collection(storage.as_ref(), keys::USERS, &mut unreadable);
        let projects: Vec<Project> =
            load_collection(storage.as_ref(), keys::PROJECTS, &mut unreadable);

        let mut repo = Self {
            storage,
            users,
            projects,
            persisted_user: None,
            unreadable,
        };

        if repo.seed_if_empty() {
            return repo;
        }

        let stored: Option<User> = get_item(repo.storage.as_ref(), keys::CURRENT_USER, None);
        let restored = stored.and_then(|user| match repo.find_user(&user.id) {
            Some(known) => Some(known.clone()),
            None => {
                tracing::warn!(user_id = %user.id, "stored current user no longer exists, ignoring");
                None
            }
        });
        repo.persisted_user = restored;

        tracing::info!(
            users = repo.users.len(),
            projects = repo.projects.len(),
            "repository loaded"
        );
        repo
    }

    /// Populates both collections with the fixed seed if either is empty.
    ///
    /// Returns `true` when seeding happened. Existing data is never rewritten,
    /// and nothing is seeded while a stored collection fails to decode.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.users.is_empty() && !self.projects.is_empty() {
            return false;
        }
        if self.unreadable {
            tracing::warn!("skipping seed, stored data could not be decoded");
            return false;
        }

        self.users = seed_users();
        self.projects = seed_projects(utc_now());
        set_item(self.storage.as_ref(), keys::USERS, &self.users);
        set_item(self.storage.as_ref(), keys::PROJECTS, &self.projects);

        tracing::info!(
            users = self.users.len(),
            projects = self.projects.len(),
            "seeded empty storage"
        );
        true
    }

    pub fn login(&mut self, user_id: &str) -> AppResult<Session> {
        let user = self
            .find_user(user_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("User with id \"{user_id}\" not found")))?;

        set_item(self.storage.as_ref(), keys::CURRENT_USER, &user);
        self.persisted_user = Some(user.clone());

        tracing::info!(user_id = %user.id, role = %user.role, "logged in");
        Ok(Session::for_user(user))
    }

    pub fn logout(&mut self, session: &mut Session) {
        if let Some(user_id) = session.user_id() {
            tracing::info!(user_id = %user_id, "logged out");
        }
        remove_item(self.storage.as_ref(), keys::CURRENT_USER);
        self.persisted_user = None;
        session.clear();
    }

    /// The session persisted by the last `login`, if its user still exists.
    pub fn restored_session(&self) -> Session {
        match &self.persisted_user {
            Some(user) => Session::for_user(user.clone()),
            None => Session::anonymous(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Candidates for task assignment.
    pub fn developers(&self) -> Vec<&User> {
        self.users.iter().filter(|u| u.role == Role::Developer).collect()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_project_by_id(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn search_projects(&self, query: &str) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.matches(query)).collect()
    }

    pub fn assignee_name(&self, task: &Task) -> &str {
        match task.assigned_to.as_deref() {
            None => "Unassigned",
            Some(id) => self.find_user(id).map(|u| u.name.as_str()).unwrap_or("Unknown"),
        }
    }

    pub fn create_project(&mut self, session: &Session, name: &str) -> AppResult<Project> {
        let name = require_text(name, "Project name cannot be empty")?;
        assert_allowed(session.user(), &Action::CreateProject)?;

        let project = Project::new(generate_id(), name, utc_now());

        let mut projects = self.projects.clone();
        projects.push(project.clone());
        self.commit_projects(projects);

        tracing::info!(
            project_id = %project.id,
            actor = ?session.user_id(),
            "project created"
        );
        Ok(project)
    }

    pub fn create_task(
        &mut self,
        session: &Session,
        project_id: &str,
        description: &str,
    ) -> AppResult<Task> {
        let description = require_text(description, "Task description cannot be empty")?;
        assert_allowed(session.user(), &Action::CreateTask)?;

        let project_idx = self.project_index(project_id)?;
        let task = Task::new(generate_id(), description, utc_now());

        let mut projects = self.projects.clone();
        projects[project_idx].tasks.push(task.clone());
        self.commit_projects(projects);

        tracing::info!(
            project_id = %project_id,
            task_id = %task.id,
            actor = ?session.user_id(),
            "task created"
        );
        Ok(task)
    }

    pub fn assign_task(
        &mut self,
        session: &Session,
        project_id: &str,
        task_id: &str,
        developer_id: &str,
    ) -> AppResult<Task> {
        assert_allowed(session.user(), &Action::AssignTask)?;

        let is_developer = self
            .find_user(developer_id)
            .map(|u| u.role == Role::Developer)
            .unwrap_or(false);
        if !is_developer {
            return Err(AppError::validation(format!(
                "Assignee \"{developer_id}\" must be a Developer"
            )));
        }

        let task = self.replace_task(project_id, task_id, |task| {
            let mut updated = task.clone();
            updated.assigned_to = Some(developer_id.to_string());
            updated.touch(utc_now());
            Ok(updated)
        })?;

        tracing::info!(
            project_id = %project_id,
            task_id = %task_id,
            assignee = %developer_id,
            actor = ?session.user_id(),
            "task assigned"
        );
        Ok(task)
    }

    pub fn update_task_status(
        &mut self,
        session: &Session,
        project_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> AppResult<Task> {
        let mut previous = status;
        let task = self.replace_task(project_id, task_id, |task| {
            assert_allowed(
                session.user(),
                &Action::UpdateTaskStatus {
                    current: task.status,
                    next: status,
                },
            )?;
            previous = task.status;

            let mut updated = task.clone();
            updated.status = status;
            updated.touch(utc_now());
            Ok(updated)
        })?;

        tracing::info!(
            project_id = %project_id,
            task_id = %task_id,
            from = %previous,
            to = %status,
            actor = ?session.user_id(),
            "task status changed"
        );
        Ok(task)
    }

    fn project_index(&self, project_id: &str) -> AppResult<usize> {
        self.projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| AppError::not_found(format!("Project with id \"{project_id}\" not found")))
    }

    /// Rebuilds the project list with one task replaced by `apply`'s result.
    ///
    /// Nothing is committed if lookup or `apply` fails.
    fn replace_task<F>(&mut self, project_id: &str, task_id: &str, apply: F) -> AppResult<Task>
    where
        F: FnOnce(&Task) -> AppResult<Task>,
    {
        let project_idx = self.project_index(project_id)?;
        let task_idx = self.projects[project_idx]
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| AppError::not_found(format!("Task with id \"{task_id}\" not found")))?;

        let updated = apply(&self.projects[project_idx].tasks[task_idx])?;

        let mut projects = self.projects.clone();
        projects[project_idx].tasks[task_idx] = updated.clone();
        self.commit_projects(projects);
        Ok(updated)
    }

    /// Swaps in the new collection, then persists it. A failed write is
    /// logged by `set_item` and the in-memory state stays authoritative.
    fn commit_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        set_item(self.storage.as_ref(), keys::PROJECTS, &self.projects);
    }
}
