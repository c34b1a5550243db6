use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use solpot_client::*;

/// Keeps every report in memory.
#[derive(Default)]
pub struct Recorder {
    pub entries: Vec<(Level, String)>,
    pub dividers: usize,
}

impl Recorder {
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Report for Recorder {
    fn report(&mut self, level: Level, message: &str) {
        self.entries.push((level, message.to_string()));
    }

    fn divider(&mut self) {
        self.dividers += 1;
    }
}

pub type CallLog = Rc<RefCell<Vec<String>>>;

/// A transport answering from a fixed table; unknown endpoints fail like a dead upstream.
pub struct ScriptedTransport {
    replies: Rc<HashMap<String, Value>>,
    log: CallLog,
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn post(&self, endpoint: &str, _body: Option<Value>) -> Result<Value, TransportError> {
        self.log.borrow_mut().push(endpoint.to_string());
        match self.replies.get(endpoint) {
            Some(value) => Ok(value.clone()),
            None => Err(serde_json::from_str::<Value>("").unwrap_err().into()),
        }
    }
}

/// Session factory whose sessions all share one reply table and one call log.
#[derive(Default)]
pub struct ScriptedSessions {
    replies: Rc<HashMap<String, Value>>,
    pub log: CallLog,
    pub cookies: Rc<RefCell<Vec<String>>>,
    pub broken: bool,
}

impl ScriptedSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, endpoint: &str, body: Value) -> Self {
        Rc::make_mut(&mut self.replies).insert(endpoint.to_string(), body);
        self
    }

    /// Session construction itself fails.
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }
}

impl SessionFactory for ScriptedSessions {
    type Session = ScriptedTransport;

    fn create(&self, credential: &Credential) -> Result<ScriptedTransport> {
        if self.broken {
            return Err(anyhow!("session setup failed"));
        }
        self.cookies.borrow_mut().push(credential.as_str().to_string());

        Ok(ScriptedTransport {
            replies: self.replies.clone(),
            log: self.log.clone(),
        })
    }
}

/// Stands in for the pipeline: records which accounts were processed and faults on the
/// chosen calls (numbered from 0 across the whole run).
#[derive(Default)]
pub struct ScriptedProcessor {
    pub processed: Vec<usize>,
    pub fault_on: HashSet<usize>,
    pub fail_on: HashSet<usize>,
}

#[async_trait(?Send)]
impl ProcessAccount for ScriptedProcessor {
    async fn process(
        &mut self,
        _credential: &Credential,
        index: usize,
        _total: usize,
        reporter: &mut dyn Report,
    ) -> Result<bool> {
        let call = self.processed.len();
        self.processed.push(index);

        if self.fault_on.contains(&call) {
            return Err(anyhow!("connection reset while processing account {}", index + 1));
        }
        if self.fail_on.contains(&call) {
            reporter.error(&format!("account {} - failed to fetch profile: Unauthorized", index + 1));
            return Ok(false);
        }
        Ok(true)
    }
}

/// Returns scripted outcomes in order, then `Interrupted` once the script runs out.
#[derive(Default)]
pub struct ScriptedWait {
    pub script: VecDeque<Result<WaitOutcome, String>>,
    pub waits: Vec<u64>,
}

impl ScriptedWait {
    pub fn new(script: Vec<Result<WaitOutcome, String>>) -> Self {
        Self {
            script: script.into(),
            waits: Vec::new(),
        }
    }

    /// Lets `n` waits elapse, then interrupts.
    pub fn elapsing(n: usize) -> Self {
        Self::new(vec![Ok(WaitOutcome::Elapsed); n])
    }
}

#[async_trait(?Send)]
impl Wait for ScriptedWait {
    async fn wait(&mut self, seconds: u64) -> Result<WaitOutcome> {
        self.waits.push(seconds);
        match self.script.pop_front() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(WaitOutcome::Interrupted),
        }
    }
}

pub fn accounts(n: usize) -> Vec<Credential> {
    (0..n).map(|i| Credential::new(format!("session=account{}", i))).collect()
}
