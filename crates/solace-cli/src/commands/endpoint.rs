use anyhow::{Context, Result};
use solace_core::SupportPipeline;
use solace_interaction::chat_endpoint::{EndpointReply, STATUS_OK};
use solace_interaction::ChatEndpoint;
use std::io::Read;
use std::path::Path;

use super::utils::{load_catalog, remote_provider};

/// Serves one request read from stdin.
///
/// Prints `{"status": <code>, "body": <reply>}` and exits non-zero when the
/// status is not 200.
pub async fn run(catalog: Option<&Path>, remote: bool) -> Result<()> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read request from stdin")?;

    let (catalog, _) = load_catalog(catalog)?;
    let pipeline = SupportPipeline::new(catalog);

    let endpoint = if remote {
        ChatEndpoint::remote(pipeline, remote_provider())
    } else {
        ChatEndpoint::new(pipeline, None)
    };
    let reply = endpoint.handle_json(&body).await;

    print_reply(&reply)?;
    if reply.status != STATUS_OK {
        std::process::exit(1);
    }
    Ok(())
}

fn print_reply(reply: &EndpointReply) -> Result<()> {
    let body: serde_json::Value =
        serde_json::from_str(&reply.body).context("Endpoint produced invalid JSON")?;
    let envelope = serde_json::json!({ "status": reply.status, "body": body });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
