use std::time::Duration;

use anyhow::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};
use solpot_api::consts::CYCLE_SETTLE_SECONDS;

use crate::accounts::Credential;
use crate::config::Config;
use crate::pipeline::ProcessAccount;
use crate::report::Report;

const SEPARATOR_WIDTH: usize = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Elapsed,
    Interrupted,
}

/// A blocking pause the scheduler can be interrupted out of.
#[async_trait(?Send)]
pub trait Wait {
    async fn wait(&mut self, seconds: u64) -> Result<WaitOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Processing the account at `next`. Index 0 opens a new cycle.
    RunningCycle { next: usize },
    /// Pausing before the account at `next`.
    InterAccountWait { next: usize },
    InterCycleWait,
    Terminated,
}

/// How the scheduler stopped. It never stops on its own.
#[derive(Debug)]
pub enum Exit {
    Interrupted,
    Fatal(Error),
}

impl Exit {
    pub fn code(&self) -> u8 {
        match self {
            Exit::Interrupted => 0,
            Exit::Fatal(_) => 1,
        }
    }
}

/// Drives the daily cycle over every account, forever.
///
/// A fault inside a cycle (an account that errors outside its steps, a broken pause between
/// accounts) is reported and treated like the end of the cycle, so the next attempt comes a
/// day later. Only a failure of the pause between cycles is fatal.
pub struct Scheduler<P, W, R> {
    accounts: Vec<Credential>,
    config: Config,
    processor: P,
    waiter: W,
    reporter: R,
    state: State,
    settle: Duration,
    cycles: u64,
}

impl<P, W, R> Scheduler<P, W, R>
where
    P: ProcessAccount,
    W: Wait,
    R: Report,
{
    pub fn new(accounts: Vec<Credential>, config: Config, processor: P, waiter: W, reporter: R) -> Self {
        Self {
            accounts,
            config,
            processor,
            waiter,
            reporter,
            state: State::RunningCycle { next: 0 },
            settle: Duration::from_secs(CYCLE_SETTLE_SECONDS),
            cycles: 0,
        }
    }

    /// Pause between the "accounts loaded" banner and the first account of a cycle.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn waiter(&self) -> &W {
        &self.waiter
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub async fn run(&mut self) -> Exit {
        loop {
            let next = match self.state {
                State::RunningCycle { next } => self.run_account(next).await,
                State::InterAccountWait { next } => self.pause_between_accounts(next).await,
                State::InterCycleWait => match self.waiter.wait(self.config.seconds_per_day).await {
                    Ok(WaitOutcome::Elapsed) => State::RunningCycle { next: 0 },
                    Ok(WaitOutcome::Interrupted) => {
                        self.state = State::Terminated;
                        return Exit::Interrupted;
                    }
                    Err(e) => {
                        self.state = State::Terminated;
                        return Exit::Fatal(e);
                    }
                },
                // Only an interrupt between accounts lands here.
                State::Terminated => return Exit::Interrupted,
            };

            debug!("Scheduler state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    async fn run_account(&mut self, index: usize) -> State {
        let total = self.accounts.len();

        if index == 0 {
            self.cycles += 1;
            self.reporter.info(&format!("accounts loaded: {}", total));
            tokio::time::sleep(self.settle).await;
            self.reporter.step(&"~".repeat(SEPARATOR_WIDTH));
        }

        let Some(credential) = self.accounts.get(index) else {
            return self.end_cycle();
        };

        let outcome = self
            .processor
            .process(credential, index, total, &mut self.reporter)
            .await;

        match outcome {
            Ok(_) if index + 1 < total => State::InterAccountWait { next: index + 1 },
            Ok(_) => self.end_cycle(),
            Err(e) => self.abort_cycle(e),
        }
    }

    async fn pause_between_accounts(&mut self, next: usize) -> State {
        self.reporter.step(&"~".repeat(SEPARATOR_WIDTH));

        match self.waiter.wait(self.config.delay_between_accounts).await {
            Ok(WaitOutcome::Elapsed) => State::RunningCycle { next },
            Ok(WaitOutcome::Interrupted) => {
                warn!("Interrupted between accounts");
                State::Terminated
            }
            Err(e) => self.abort_cycle(e),
        }
    }

    fn end_cycle(&mut self) -> State {
        self.reporter.divider();
        self.reporter.info("waiting for the next cycle...");
        State::InterCycleWait
    }

    fn abort_cycle(&mut self, err: Error) -> State {
        self.reporter.error(&format!("cycle error: {:#}", err));
        self.reporter.warning("restarting cycle in 24 hours...");
        State::InterCycleWait
    }
}
