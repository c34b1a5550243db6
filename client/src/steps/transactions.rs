use solpot_api::prelude::*;

use super::{call, StepContext};
use crate::error::StepError;
use crate::report::Report;
use crate::session::Transport;

/// Scans the first page of the transaction history for the latest daily reward payout.
/// Finding none is not a failure.
pub async fn report_last_reward<S: Transport + ?Sized>(session: &S, ctx: &mut StepContext<'_>) -> bool {
    match last_reward(session).await {
        Ok(Some(date)) => {
            ctx.reporter
                .success(&format!("last reward received: {} UTC", date));
            true
        }
        Ok(None) => {
            ctx.reporter.warning("no previous reward received found.");
            true
        }
        Err(e) => ctx.fail("failed to fetch transaction history", &e),
    }
}

async fn last_reward<S: Transport + ?Sized>(session: &S) -> Result<Option<String>, StepError> {
    let body = serde_json::to_value(TransactionsQuery::default())?;
    let history: TransactionHistory = call(session, TRANSACTIONS_ENDPOINT, Some(body))
        .await?
        .into_data()?;

    let Some(tx) = history.last_daily_reward() else {
        return Ok(None);
    };

    let raw = tx.date.unwrap_or_default();
    let date = parse_timestamp(&raw).map_err(|source| StepError::Timestamp { raw, source })?;
    Ok(Some(format_timestamp(&date)))
}
