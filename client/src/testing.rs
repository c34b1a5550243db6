//! Doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::report::{Level, Report};
use crate::session::Transport;
use crate::steps::StepContext;

/// Keeps every report in memory.
#[derive(Default)]
pub struct Recorder {
    pub entries: Vec<(Level, String)>,
    pub dividers: usize,
}

impl Recorder {
    pub fn context(&mut self, index: usize, update_client_seed: bool) -> StepContext<'_> {
        StepContext {
            index,
            update_client_seed,
            reporter: self,
        }
    }

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

enum Reply {
    Json(Value),
    Malformed,
}

/// Answers each endpoint with a canned reply and remembers what was sent.
#[derive(Default)]
pub struct Scripted {
    replies: HashMap<String, Reply>,
    calls: RefCell<Vec<(String, Option<Value>)>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, endpoint: &str, body: Value) -> Self {
        self.replies.insert(endpoint.to_string(), Reply::Json(body));
        self
    }

    /// The endpoint answers with something that is not JSON.
    pub fn malformed(mut self, endpoint: &str) -> Self {
        self.replies.insert(endpoint.to_string(), Reply::Malformed);
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.borrow().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(e, _)| e.clone()).collect()
    }
}

#[async_trait(?Send)]
impl Transport for Scripted {
    async fn post(&self, endpoint: &str, body: Option<Value>) -> Result<Value, TransportError> {
        self.calls.borrow_mut().push((endpoint.to_string(), body));
        match self.replies.get(endpoint) {
            Some(Reply::Json(value)) => Ok(value.clone()),
            Some(Reply::Malformed) | None => {
                Err(serde_json::from_str::<Value>("<html>502 Bad Gateway</html>")
                    .unwrap_err()
                    .into())
            }
        }
    }
}
