use solpot_api::prelude::*;

use super::{call, StepContext};
use crate::error::StepError;
use crate::report::Report;
use crate::session::Transport;

/// Opens today's free case.
///
/// The API has no error code for "already opened today", only a message containing
/// `once per day`. That rejection is not a failure: the account simply moves on.
pub async fn open_daily_case<S: Transport + ?Sized>(session: &S, ctx: &mut StepContext<'_>) -> bool {
    match open(session).await {
        Ok(case) => {
            ctx.reporter.success("daily case opened successfully!");
            ctx.reporter.info(&format!("target block: {}", case.target_block));
            true
        }
        Err(e) if is_already_claimed(&e) => {
            ctx.reporter.warning("daily case already claimed today");
            true
        }
        Err(e) => ctx.fail("failed to open daily case", &e),
    }
}

fn is_already_claimed(err: &StepError) -> bool {
    err.rejection().is_some_and(|message| message.contains(ONCE_PER_DAY))
}

async fn open<S: Transport + ?Sized>(session: &S) -> Result<DailyCase, StepError> {
    let body = serde_json::to_value(OpenDailyCase { demo: false })?;
    Ok(call(session, DAILY_CASE_ENDPOINT, Some(body)).await?.into_data()?)
}
