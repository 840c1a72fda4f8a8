//! Client for the contacts REST resource.
//!
//! Every operation makes a single attempt against `{base}/contacts...`. Any
//! transport error, non-2xx status or undecodable body is logged and the
//! same operation is performed against the [`LocalStore`] instead. The
//! returned [`Sourced`] tells the caller which path answered.

use chrono::{DateTime, TimeZone};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::stats;
use super::store::LocalStore;
use super::types::{Message, MessageDraft, MessagePatch, MessageStatus, Sourced, Stats};
use crate::config::ApiConfig;
use crate::error::ServiceError;

/// HTTP seam between [`MessageService`] and the network.
pub trait Transport: Send + Sync {
    /// Send one request to `path` (relative to the base URL) and return the
    /// response body. Non-2xx responses are errors.
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, ServiceError>;
}

/// Blocking reqwest transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, ServiceError> {
        Self::new(api.base_url(), Duration::from_secs(api.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let resp = request.send()?;
        if !resp.status().is_success() {
            return Err(ServiceError::Http {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.text()?)
    }
}

/// Contacts API with local-store fallback
pub struct MessageService {
    transport: Box<dyn Transport>,
    store: LocalStore,
}

impl MessageService {
    pub fn new(transport: Box<dyn Transport>, store: LocalStore) -> Self {
        Self { transport, store }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ServiceError> {
        let text = self.transport.send(method, path, body)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn list(&self) -> Sourced<Vec<Message>> {
        match self.call(Method::GET, "/contacts", None) {
            Ok(messages) => Sourced::remote(messages),
            Err(e) => {
                log::warn!("Error fetching messages: {}", e);
                Sourced::local(self.store.get_all())
            }
        }
    }

    pub fn create(&self, draft: &MessageDraft) -> Sourced<Option<Message>> {
        let body = serde_json::json!({
            "name": draft.name,
            "email": draft.email,
            "message": draft.message,
        });
        match self.call(Method::POST, "/contacts", Some(body)) {
            Ok(message) => Sourced::remote(Some(message)),
            Err(e) => {
                log::warn!("Error creating message: {}", e);
                Sourced::local(self.store.add(draft))
            }
        }
    }

    pub fn update_status(&self, id: &str, status: MessageStatus) -> Sourced<Option<Message>> {
        let path = format!("/contacts/{}", urlencoding::encode(id));
        let body = serde_json::json!({ "status": status });
        match self.call(Method::PATCH, &path, Some(body)) {
            Ok(message) => Sourced::remote(Some(message)),
            Err(e) => {
                log::warn!("Error updating message status: {}", e);
                Sourced::local(self.store.update(id, &MessagePatch::status(status)))
            }
        }
    }

    pub fn delete(&self, id: &str) -> Sourced<bool> {
        let path = format!("/contacts/{}", urlencoding::encode(id));
        match self.transport.send(Method::DELETE, &path, None) {
            Ok(_) => Sourced::remote(true),
            Err(e) => {
                log::warn!("Error deleting message: {}", e);
                Sourced::local(self.store.remove(id))
            }
        }
    }

    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Sourced<Stats> {
        match self.call(Method::GET, "/contacts/stats", None) {
            Ok(stats) => Sourced::remote(stats),
            Err(e) => {
                log::warn!("Error fetching stats: {}", e);
                Sourced::local(stats::compute(&self.store.get_all(), now))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Scripted transport: answers from a table keyed by "METHOD path",
    /// everything else fails like an unreachable host.
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: HashMap<String, Result<String, u16>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub fn offline() -> Self {
            Self::default()
        }

        pub fn respond(mut self, method: Method, path: &str, body: &str) -> Self {
            self.responses
                .insert(format!("{} {}", method, path), Ok(body.to_string()));
            self
        }

        pub fn fail(mut self, method: Method, path: &str, status: u16) -> Self {
            self.responses
                .insert(format!("{} {}", method, path), Err(status));
            self
        }
    }

    impl Transport for Arc<ScriptedTransport> {
        fn send(
            &self,
            method: Method,
            path: &str,
            body: Option<serde_json::Value>,
        ) -> Result<String, ServiceError> {
            (**self).send(method, path, body)
        }
    }

    impl Transport for ScriptedTransport {
        fn send(
            &self,
            method: Method,
            path: &str,
            _body: Option<serde_json::Value>,
        ) -> Result<String, ServiceError> {
            let key = format!("{} {}", method, path);
            self.calls.lock().unwrap().push(key.clone());
            match self.responses.get(&key) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(ServiceError::Http { status: *status }),
                // 503 stands in for a refused connection
                None => Err(ServiceError::Http { status: 503 }),
            }
        }
    }
}
