use anyhow::{Context, bail};

use workforce_auth::Credentials;
use workforce_console::{AdminConsole, ConsoleConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    workforce_observability::init();

    let config = ConsoleConfig::from_env();
    let console = AdminConsole::new(&config).context("failed to build admin console")?;

    if !console.store().snapshot().is_authenticated() {
        let username = std::env::var("WORKFORCE_ADMIN_USER").context("WORKFORCE_ADMIN_USER not set")?;
        let password = std::env::var("WORKFORCE_ADMIN_PASSWORD").context("WORKFORCE_ADMIN_PASSWORD not set")?;

        let outcome = console.store().login(Credentials::new(username, password)).await;
        if !outcome.is_success() {
            let reason = console.store().snapshot().error().unwrap_or("unknown error").to_string();
            bail!("login failed: {reason}");
        }
    }

    console.load().await.context("failed to load workers and roles")?;

    for row in console.worker_rows() {
        tracing::info!(
            index = row.index,
            name = %row.worker.name,
            document = %row.worker.document,
            role = %row.role,
            "worker"
        );
    }
    tracing::info!(roles = console.roles().items().len(), "roles loaded");

    console.unmount();
    Ok(())
}
