mod daily_case;
mod profile;
mod seed;
mod transactions;

pub use daily_case::*;
pub use profile::*;
pub use seed::*;
pub use transactions::*;

use serde_json::Value;
use solpot_api::types::Envelope;

use crate::error::StepError;
use crate::report::Report;
use crate::session::Transport;

/// What a step needs besides the session: where it is in the run, and where to report.
pub struct StepContext<'a> {
    pub index: usize,
    pub update_client_seed: bool,
    pub reporter: &'a mut dyn Report,
}

impl StepContext<'_> {
    /// Reports a failed step, tagged with the 1-based account number.
    pub(crate) fn fail(&mut self, what: &str, err: &StepError) -> bool {
        self.reporter
            .error(&format!("account {} - {}: {}", self.index + 1, what, err));
        false
    }
}

/// The per-account steps, in the order the pipeline runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Profile,
    ClientSeed,
    DailyCase,
    Transactions,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Profile, Step::ClientSeed, Step::DailyCase, Step::Transactions];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Profile => "profile",
            Step::ClientSeed => "client seed",
            Step::DailyCase => "daily case",
            Step::Transactions => "transactions",
        }
    }

    /// Runs the step. `false` means the remaining steps for this account should be skipped.
    pub async fn run<S: Transport + ?Sized>(self, session: &S, ctx: &mut StepContext<'_>) -> bool {
        match self {
            Step::Profile => fetch_profile(session, ctx).await,
            Step::ClientSeed => update_client_seed(session, ctx).await,
            Step::DailyCase => open_daily_case(session, ctx).await,
            Step::Transactions => report_last_reward(session, ctx).await,
        }
    }
}

/// Posts to `endpoint` and unwraps the envelope, turning `success: false` into
/// [`StepError::Rejected`].
pub(crate) async fn call<S: Transport + ?Sized>(
    session: &S,
    endpoint: &str,
    body: Option<Value>,
) -> Result<Envelope, StepError> {
    let reply = session.post(endpoint, body).await?;
    let envelope: Envelope = serde_json::from_value(reply)?;

    if !envelope.success {
        return Err(StepError::Rejected(envelope.error_message()));
    }
    Ok(envelope)
}
