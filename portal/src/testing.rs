//! Test doubles for exercising the session and feed logic without a backend.
//!
//! Provides a configurable in-memory [`PortalApi`] stub and a recording
//! [`Navigator`], so session flows can be driven deterministically from
//! unit and integration tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use journal_api::{ApiError, PortalApi};
use serde_json::Value;

use crate::navigation::{Navigator, Route};

/// In-memory [`PortalApi`] whose payload-bearing responses are configured up
/// front. An unconfigured endpoint fails; every call is recorded.
pub struct StubApi {
    login: Option<Value>,
    profile: Option<Value>,
    notifications: Option<Value>,
    calls: Mutex<Vec<String>>,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            login: None,
            profile: None,
            notifications: Some(Value::Array(Vec::new())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the successful login response body.
    pub fn with_login(mut self, body: Value) -> Self {
        self.login = Some(body);
        self
    }

    /// Sets the successful profile response body.
    pub fn with_profile(mut self, body: Value) -> Self {
        self.profile = Some(body);
        self
    }

    /// Sets the successful notification-list response body.
    pub fn with_notifications(mut self, body: Value) -> Self {
        self.notifications = Some(body);
        self
    }

    /// Makes the notification-list call fail.
    pub fn failing_notifications(mut self) -> Self {
        self.notifications = None;
        self
    }

    /// Every endpoint invocation so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call.into());
    }
}

#[async_trait]
impl PortalApi for StubApi {
    async fn login(&self, _phone: &str, _password: &str) -> Result<Value, ApiError> {
        self.record("login");
        self.login.clone().ok_or(ApiError::Status {
            status: 401,
            detail: "Invalid credentials".to_owned(),
        })
    }

    async fn profile(&self) -> Result<Value, ApiError> {
        self.record("profile");
        self.profile.clone().ok_or(ApiError::Status {
            status: 401,
            detail: "Authentication credentials were not provided.".to_owned(),
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout");
        Ok(())
    }

    async fn notifications(&self) -> Result<Value, ApiError> {
        self.record("notifications");
        self.notifications
            .clone()
            .ok_or_else(|| ApiError::Connection("stubbed notification failure".to_owned()))
    }

    async fn mark_read(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("mark_read:{id}"));
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.record("mark_all_read");
        Ok(())
    }
}

/// [`Navigator`] that records every transition it is asked to perform.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
