use anyhow::{Context, Result};
use tracing::info;

use crate::{command::Action, payload::PushPayload};

/// Boundary to the external push/apply executor.
///
/// The executor receives the payload, the action, and the environment;
/// running it is outside this program. This step records the hand-off.
pub fn run(action: Action, environment: &str, payload: &PushPayload) -> Result<()> {
    let payload_json =
        serde_json::to_string(payload).context("failed to serialize push payload")?;

    info!("data: {}", payload_json);
    info!("Processing {}ing pajee configuration on {}", action, environment);

    Ok(())
}
