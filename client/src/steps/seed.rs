use solpot_api::prelude::*;

use super::{call, StepContext};
use crate::error::StepError;
use crate::report::Report;
use crate::session::Transport;

/// Rotates the account's client seed to a fresh random one. When rotation is switched off
/// in the config, reads the profile instead and reports the seed currently in use.
pub async fn update_client_seed<S: Transport + ?Sized>(session: &S, ctx: &mut StepContext<'_>) -> bool {
    if !ctx.update_client_seed {
        return match current_seed(session).await {
            Ok(seed) => {
                ctx.reporter.success(&format!(
                    "client seed change is disabled. Current seed: {}",
                    seed.current()
                ));
                true
            }
            Err(e) => ctx.fail("failed to read client seed", &e),
        };
    }

    let new_seed = generate_client_seed();
    match set_seed(session, &new_seed).await {
        Ok(()) => {
            ctx.reporter.success("client seed updated successfully");
            ctx.reporter.info(&new_seed);
            true
        }
        Err(e) => ctx.fail("failed to update client seed", &e),
    }
}

async fn current_seed<S: Transport + ?Sized>(session: &S) -> Result<SeedInfo, StepError> {
    Ok(call(session, PROFILE_ENDPOINT, None).await?.into_data()?)
}

async fn set_seed<S: Transport + ?Sized>(session: &S, seed: &str) -> Result<(), StepError> {
    let body = serde_json::to_value(UpdateClientSeed { client_seed: seed.to_string() })?;
    call(session, CLIENT_SEED_ENDPOINT, Some(body)).await?;
    Ok(())
}
