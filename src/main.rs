use anyhow::Context;

use taskboard::config::{Config, StorageBackend};
use taskboard::Repository;

fn main() -> anyhow::Result<()> {
    load_env();
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    let storage = config.open_storage().context("failed to open storage")?;

    match &config.storage {
        StorageBackend::Memory => tracing::info!("using in-memory storage"),
        StorageBackend::File { dir } => tracing::info!("using file storage at {}", dir.display()),
    }

    let repo = Repository::open(storage);

    for project in repo.projects() {
        let summary = project.summary();
        tracing::info!(
            project_id = %project.id,
            tasks = summary.task_count,
            completed = summary.completed_count,
            "{}",
            project.name
        );
    }

    match repo.restored_session().user() {
        Some(user) => tracing::info!(user_id = %user.id, role = %user.role, "session restored"),
        None => tracing::info!("no current user, login required"),
    }

    Ok(())
}

fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
