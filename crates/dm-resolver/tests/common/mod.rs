//! Test doubles and common utilities for resolver contract tests
//!
//! The lookup answers from a script and counts calls; the sink records every
//! set it is handed.

#![allow(dead_code)]

use dm_resolver::error::Result;
use dm_resolver::{EndpointSet, EndpointSink, Error, NameLookup};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted lookup answer
#[derive(Debug, Clone)]
pub enum Answer {
    /// Return these addresses
    Ips(Vec<IpAddr>),
    /// Fail the lookup
    Fail,
}

/// Shorthand for an answer made of IP strings
pub fn ips(addrs: &[&str]) -> Answer {
    Answer::Ips(
        addrs
            .iter()
            .map(|a| a.parse().expect("valid IP literal"))
            .collect(),
    )
}

/// A lookup that replays a script; the last answer repeats forever
pub struct ScriptedLookup {
    answers: Mutex<Vec<Answer>>,
    calls: Arc<AtomicUsize>,
    hosts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedLookup {
    pub fn new(answers: Vec<Answer>) -> Self {
        let mut answers = answers;
        answers.reverse();

        Self {
            answers: Mutex::new(answers),
            calls: Arc::new(AtomicUsize::new(0)),
            hosts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Make every lookup take `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times lookup_ip() was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Hosts passed to lookup_ip(), in call order
    pub fn hosts(&self) -> Vec<String> {
        self.hosts.lock().unwrap().clone()
    }

    fn next_answer(&self) -> Answer {
        let mut answers = self.answers.lock().unwrap();
        if answers.len() > 1 {
            answers.pop().unwrap()
        } else {
            answers.last().cloned().unwrap_or(Answer::Ips(Vec::new()))
        }
    }
}

#[async_trait::async_trait]
impl NameLookup for ScriptedLookup {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hosts.lock().unwrap().push(host.to_string());

        let answer = self.next_answer();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match answer {
            Answer::Ips(ips) => Ok(ips),
            Answer::Fail => Err(Error::lookup("scripted", format!("{host}: no such host"))),
        }
    }

    fn lookup_name(&self) -> &'static str {
        "scripted"
    }
}

/// A sink that records every published set
#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<EndpointSet>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of times publish() was called
    pub fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    /// Every published set, in order
    pub fn published(&self) -> Vec<EndpointSet> {
        self.published.lock().unwrap().clone()
    }

    /// The most recently published set
    pub fn last(&self) -> Option<EndpointSet> {
        self.published.lock().unwrap().last().cloned()
    }
}

impl EndpointSink for RecordingSink {
    fn publish(&self, endpoints: &EndpointSet) {
        self.published.lock().unwrap().push(endpoints.clone());
    }
}

/// Refresh interval used by watching tests
pub const INTERVAL: Duration = Duration::from_secs(10);

/// Let `n` full refresh intervals pass (plus a margin)
pub async fn wait_ticks(n: u32) {
    tokio::time::sleep(INTERVAL * n + Duration::from_secs(1)).await;
}
