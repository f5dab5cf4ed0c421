//! Subcommand implementations

use std::collections::HashMap;
use std::future::Future;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sf_report_application::{ApplicationError, ApplicationResult, FunctionInvocation};
use sf_report_domain::AppManifest;
use sf_report_infrastructure::{ProcessEnv, Runtime};
use tracing::info;

/// Runs the function once and prints the platform response.
pub async fn run(
    data: Option<String>,
    invocation_file: Option<&Path>,
    timeout: Duration,
) -> Result<()> {
    let invocation = match (data, invocation_file) {
        (_, Some(path)) => read_invocation(path)?,
        (Some(data), None) => FunctionInvocation::with_salesforce_data(data, process_env()),
        (None, None) => {
            let mut data = String::new();
            std::io::stdin()
                .read_to_string(&mut data)
                .context("failed to read report data from stdin")?;
            FunctionInvocation::with_salesforce_data(data, process_env())
        }
    };

    let runtime = runtime()?;
    info!("Running weekly report function...");

    let response = bounded(runtime.report().handle(&invocation), timeout, interrupted())
        .await
        .context("weekly report failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Obtains a token and prints its status without revealing it.
pub async fn token(refresh: bool) -> Result<()> {
    let runtime = runtime()?;
    let tokens = runtime.tokens();

    if refresh {
        info!("Requesting a new access token...");
        tokens.refresh().await?;
    } else {
        tokens.ensure_valid().await?;
    }

    let credential = tokens
        .cached_credential()
        .await
        .context("token endpoint returned no credential")?;

    println!("Status:     {}", tokens.status().await.display_message());
    println!("Token:      {}", credential.preview());
    println!("Type:       {}", credential.token_type);
    if let Some(instance_url) = &credential.instance_url {
        println!("Instance:   {instance_url}");
    }
    println!("Expires at: {}", credential.expires_at.to_rfc3339());
    Ok(())
}

/// Prints the manifest in its platform JSON shape.
pub fn manifest() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&AppManifest::default())?);
    Ok(())
}

/// Runs `operation` until it finishes, `timeout` elapses, or `cancel` resolves.
async fn bounded<T>(
    operation: impl Future<Output = ApplicationResult<T>>,
    timeout: Duration,
    cancel: impl Future<Output = ()>,
) -> ApplicationResult<T> {
    tokio::select! {
        result = tokio::time::timeout(timeout, operation) => {
            result.map_err(|_| ApplicationError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })?
        }
        () = cancel => Err(ApplicationError::Cancelled),
    }
}

/// Resolves on ctrl-c; never resolves if the signal handler is unavailable.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn runtime() -> Result<Runtime> {
    Runtime::build(Arc::new(ProcessEnv::new()), AppManifest::default())
        .context("failed to initialize runtime")
}

fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

fn read_invocation(path: &Path) -> Result<FunctionInvocation> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut invocation: FunctionInvocation = serde_json::from_str(&content)
        .with_context(|| format!("invalid invocation payload in {}", path.display()))?;

    // Process variables fill in whatever the payload leaves out
    for (key, value) in process_env() {
        invocation.env.entry(key).or_insert(value);
    }
    Ok(invocation)
}
