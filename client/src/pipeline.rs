use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::accounts::Credential;
use crate::report::Report;
use crate::session::SessionFactory;
use crate::steps::{Step, StepContext};

/// Handles one account within a cycle.
///
/// `Ok(false)` means a step failed and was reported; the scheduler just moves on. An `Err`
/// is a fault outside any step and aborts the whole cycle.
#[async_trait(?Send)]
pub trait ProcessAccount {
    async fn process(
        &mut self,
        credential: &Credential,
        index: usize,
        total: usize,
        reporter: &mut dyn Report,
    ) -> Result<bool>;
}

/// Runs the fixed step sequence for an account over a fresh session, stopping at the first
/// step that fails.
pub struct Pipeline<F> {
    sessions: F,
    update_client_seed: bool,
}

impl<F: SessionFactory> Pipeline<F> {
    pub fn new(sessions: F, update_client_seed: bool) -> Self {
        Self {
            sessions,
            update_client_seed,
        }
    }
}

#[async_trait(?Send)]
impl<F: SessionFactory> ProcessAccount for Pipeline<F> {
    async fn process(
        &mut self,
        credential: &Credential,
        index: usize,
        total: usize,
        reporter: &mut dyn Report,
    ) -> Result<bool> {
        reporter.info(&format!("account      : {}/{}", index + 1, total));

        let session = self.sessions.create(credential)?;
        let mut ctx = StepContext {
            index,
            update_client_seed: self.update_client_seed,
            reporter,
        };

        for step in Step::ALL {
            if !step.run(&session, &mut ctx).await {
                debug!("Account {} stopped at the {} step", index + 1, step.name());
                return Ok(false);
            }
        }

        debug!("Account {} completed all steps", index + 1);
        Ok(true)
    }
}
