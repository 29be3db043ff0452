mod auth;
mod config;
mod jenkins;
mod slack;
mod types;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use auth::AllowList;
use config::Config;
use jenkins::JenkinsClient;
use types::SlackCommand;

/// Shared state: the allow-list, the long-lived Jenkins client, and the
/// optional Slack signing secret. Cloned per request.
#[derive(Clone)]
struct AppState {
    allow_list: AllowList,
    jenkins: JenkinsClient,
    signing_secret: Option<String>,
}

impl AppState {
    fn new(config: &Config) -> Self {
        Self {
            allow_list: AllowList::new(config.authorized_users.iter().cloned()),
            jenkins: JenkinsClient::new(
                &config.jenkins_url,
                &config.jenkins_user,
                &config.jenkins_token,
            ),
            signing_secret: config.slack_signing_secret.clone(),
        }
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/slack/events", post(handle_slash_command))
        .with_state(state)
}

async fn health() -> &'static str {
    "ChatOps Bot is running 🚀"
}

/// Entry point for the `/deploy` slash command.
///
/// Every pipeline outcome is a `200 OK` plain-text reply; Slack renders the
/// body as message text whether the deployment started or not. Only the
/// signature gate (when a signing secret is configured) answers 401.
async fn handle_slash_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Some(secret) = &state.signing_secret {
        let signature = header_str(&headers, "X-Slack-Signature");
        let timestamp = header_str(&headers, "X-Slack-Request-Timestamp");
        if !slack::verify_signature(secret, &body, timestamp, signature) {
            tracing::warn!("rejected request with a bad slack signature");
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
    }

    let command: SlackCommand = serde_urlencoded::from_str(&body).unwrap_or_default();
    tracing::info!(
        user = %command.user_name,
        user_id = %command.user_id,
        channel = %command.channel_name,
        command = %command.command,
        text = %command.text,
        "slash command received"
    );

    handle_deploy(&state, &command).await.into_response()
}

/// Authorize, trigger, and format the reply. Never fails: every branch ends
/// in exactly one reply string.
async fn handle_deploy(state: &AppState, command: &SlackCommand) -> String {
    if !state.allow_list.is_authorized(&command.user_name) {
        tracing::warn!(user = %command.user_name, "deploy refused: not in allow-list");
        return format!("🚫 {}, you're not allowed to deploy.", command.user_name);
    }

    let target = match slack::parse_deploy_target(&command.text) {
        Ok(target) => target,
        Err(usage) => return usage,
    };

    match state
        .jenkins
        .trigger_build(&target.environment, &target.service)
        .await
    {
        Ok(_) => {
            tracing::info!(
                service = %target.service,
                environment = %target.environment,
                "deployment started"
            );
            format!(
                "🚀 Deployment started for *{}* on *{}*",
                target.service, target.environment
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "jenkins build trigger failed");
            format!("❌ Deployment failed: {e}")
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatops_deploy_bot=info".into()),
        )
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("ChatOps Bot running at http://{addr}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
