//! Scripted provider double for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::chain::provider::{EthProvider, rpc_error};
use crate::error::ChainError;

type Reply = Result<Value, (i64, String)>;

#[derive(Default)]
pub struct MockProvider {
    /// One-shot replies, popped per call.
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
    /// Fallback replies, returned whenever the queue for a method is empty.
    fixed: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub(&self, method: &str, result: Value) {
        self.fixed.lock().unwrap().insert(method.to_string(), result);
    }

    pub fn push(&self, method: &str, result: Value) {
        self.queued
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(Ok(result));
    }

    pub fn push_error(&self, method: &str, code: i64, message: &str) {
        self.queued
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(Err((code, message.to_string())));
    }

    pub fn calls_of(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == method)
            .count()
    }

    pub fn last_params(&self, method: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(name, _)| name == method)
            .map(|(_, params)| params.clone())
    }
}

#[async_trait]
impl EthProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));

        if let Some(queue) = self.queued.lock().unwrap().get_mut(method) {
            if let Some(reply) = queue.pop_front() {
                return reply.map_err(|(code, message)| rpc_error(code, &message));
            }
        }

        if let Some(result) = self.fixed.lock().unwrap().get(method) {
            return Ok(result.clone());
        }

        Err(ChainError::Rpc(format!("unscripted method {method}")))
    }
}
