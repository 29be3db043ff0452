use serde::Deserialize;

/// Form-encoded slash-command payload as Slack delivers it.
///
/// Slack sends more fields than these (`token`, `team_id`, `response_url`,
/// ...); only the ones the bot reads are kept. Missing fields deserialize
/// to empty strings rather than failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlackCommand {
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
}

/// Environment/service pair parsed from the command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    pub environment: String,
    pub service: String,
}
