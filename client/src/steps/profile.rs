use solpot_api::prelude::*;

use super::{call, StepContext};
use crate::error::StepError;
use crate::report::Report;
use crate::session::Transport;

/// Fetches the account profile and reports who it belongs to.
pub async fn fetch_profile<S: Transport + ?Sized>(session: &S, ctx: &mut StepContext<'_>) -> bool {
    match get_profile(session).await {
        Ok(profile) => {
            ctx.reporter
                .info(&format!("telegram     : @{}", profile.telegram.username));
            ctx.reporter.info(&format!(
                "referred by  : {} (owner: {})",
                profile.referral_code(),
                profile.referral_owner()
            ));
            true
        }
        Err(e) => ctx.fail("failed to fetch profile", &e),
    }
}

async fn get_profile<S: Transport + ?Sized>(session: &S) -> Result<Profile, StepError> {
    Ok(call(session, PROFILE_ENDPOINT, None).await?.into_data()?)
}
