//! In-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Pdf4meError, Result};
use crate::transport::{HttpResponse, HttpTransport};

/// Replays queued responses and records every request it receives.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    post_responses: Mutex<VecDeque<HttpResponse>>,
    get_responses: Mutex<VecDeque<HttpResponse>>,
    default_get: Mutex<Option<HttpResponse>>,
    stalled_gets: AtomicBool,
    documents: Mutex<HashMap<String, Vec<u8>>>,
    posts: Mutex<Vec<(String, Value)>>,
    gets: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_post(&self, response: HttpResponse) {
        self.post_responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_get(&self, response: HttpResponse) {
        self.get_responses.lock().unwrap().push_back(response);
    }

    /// Response for every GET once the queue is empty.
    pub(crate) fn set_default_get(&self, response: HttpResponse) {
        *self.default_get.lock().unwrap() = Some(response);
    }

    /// Every GET is recorded and then never answers.
    pub(crate) fn stall_gets(&self) {
        self.stalled_gets.store(true, Ordering::SeqCst);
    }

    pub(crate) fn add_document(&self, url: &str, bytes: &[u8]) {
        self.documents
            .lock()
            .unwrap()
            .insert(url.to_string(), bytes.to_vec());
    }

    pub(crate) fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    pub(crate) fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    pub(crate) fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse> {
        self.posts
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));
        self.post_responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Pdf4meError::invalid_response("no scripted POST response"))
    }

    async fn get(&self, location: &str) -> Result<HttpResponse> {
        self.gets.lock().unwrap().push(location.to_string());
        if self.stalled_gets.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let queued = self.get_responses.lock().unwrap().pop_front();
        queued
            .or_else(|| self.default_get.lock().unwrap().clone())
            .ok_or_else(|| Pdf4meError::invalid_response("no scripted GET response"))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(url.to_string());
        self.documents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Pdf4meError::api(404, "Not Found"))
    }
}
