//! Infrastructure implementation of the platform API ports over HTTPS.
//!
//! Requests carry the API key as the basic-auth password and ask for JSON.
//! Non-success responses map to typed [`ApiError`]s.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::application::ports::{AppsApi, ProcessApi};
use crate::domain::config::ApiConfig;
use crate::domain::{ApiError, AppInfo, AppSummary, CreatedApp, Process, ProcessTarget};

/// Per-request timeout for platform API calls.
pub const API_TIMEOUT: Duration = Duration::from_secs(60);

/// `PlatformApi` backed by the platform's HTTP API.
pub struct HttpPlatformClient {
    http: reqwest::Client,
    base_url: String,
    key: Option<String>,
    user: Option<String>,
    config_path: String,
}

impl HttpPlatformClient {
    /// Build a client from API settings. Missing credentials are only
    /// reported when a request is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig, config_path: &Path) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("hk/", env!("CARGO_PKG_VERSION")))
            .timeout(API_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            user: config.user.clone(),
            config_path: config_path.display().to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| ApiError::MissingCredentials {
                config: self.config_path.clone(),
            })?;
        Ok(self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .basic_auth("", Some(key))
            .header(ACCEPT, "application/json"))
    }

    async fn send(&self, req: RequestBuilder, path: &str) -> Result<Response> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        tracing::debug!(path, status = status.as_u16(), "api response");
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(api_error(status, path, &body).into())
    }

    async fn call(&self, method: Method, path: &str) -> Result<Response> {
        tracing::debug!(%method, path, "api request");
        self.send(self.request(method, path)?, path).await
    }

    async fn call_form(
        &self,
        method: Method,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<Response> {
        tracing::debug!(%method, path, "api request");
        self.send(self.request(method, path)?.form(form), path).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode_json(self.call(Method::GET, path).await?).await
    }
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()).into())
}

async fn read_text(resp: Response) -> Result<String> {
    resp.text()
        .await
        .map(|t| t.trim().to_string())
        .map_err(|e| ApiError::Transport(e.to_string()).into())
}

/// Map a failed response to a typed error.
#[must_use]
pub fn api_error(status: StatusCode, path: &str, body: &str) -> ApiError {
    match status.as_u16() {
        401 | 403 => ApiError::Unauthorized,
        404 => ApiError::NotFound(path.to_string()),
        code => ApiError::Status {
            status: code,
            message: error_message(body),
        },
    }
}

/// The `error` field of a JSON error body, or the trimmed body itself.
#[must_use]
pub fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from));
    match from_json {
        Some(msg) => msg,
        None if body.trim().is_empty() => "no details".to_string(),
        None => body.trim().to_string(),
    }
}

/// Read a count from either a bare number or a JSON object field.
#[must_use]
pub fn parse_count(body: &str, field: &str) -> Option<u64> {
    body.trim().parse().ok().or_else(|| {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get(field)?
            .as_u64()
    })
}

impl AppsApi for HttpPlatformClient {
    async fn user(&self) -> Result<String> {
        if let Some(user) = &self.user {
            return Ok(user.clone());
        }
        let account: serde_json::Value = self.get_json("/account").await?;
        account
            .get("email")
            .and_then(|e| e.as_str())
            .map(String::from)
            .ok_or_else(|| ApiError::Decode("account has no email".to_string()).into())
    }

    async fn list_apps(&self) -> Result<Vec<AppSummary>> {
        self.get_json("/apps").await
    }

    async fn app_info(&self, app: &str) -> Result<AppInfo> {
        self.get_json(&format!("/apps/{app}")).await
    }

    async fn create_app(&self, name: Option<&str>, stack: Option<&str>) -> Result<CreatedApp> {
        let mut form = Vec::new();
        if let Some(name) = name {
            form.push(("app[name]", name));
        }
        if let Some(stack) = stack {
            form.push(("app[stack]", stack));
        }
        decode_json(self.call_form(Method::POST, "/apps", &form).await?).await
    }

    async fn create_complete(&self, app: &str) -> Result<bool> {
        let resp = self
            .call(Method::PUT, &format!("/apps/{app}/status"))
            .await?;
        Ok(resp.status() == StatusCode::CREATED)
    }

    async fn rename_app(&self, app: &str, new_name: &str) -> Result<()> {
        self.call_form(Method::PUT, &format!("/apps/{app}"), &[("app[name]", new_name)])
            .await
            .map(drop)
    }

    async fn destroy_app(&self, app: &str) -> Result<()> {
        self.call(Method::DELETE, &format!("/apps/{app}"))
            .await
            .map(drop)
    }

    async fn install_addon(&self, app: &str, addon: &str) -> Result<()> {
        self.call(Method::POST, &format!("/apps/{app}/addons/{addon}"))
            .await
            .map(drop)
    }

    async fn add_config_vars(&self, app: &str, vars: &BTreeMap<String, String>) -> Result<()> {
        let path = format!("/apps/{app}/config_vars");
        tracing::debug!(path, "api request");
        let req = self.request(Method::PUT, &path)?.json(vars);
        self.send(req, &path).await.map(drop)
    }
}

impl ProcessApi for HttpPlatformClient {
    async fn processes(&self, app: &str) -> Result<Vec<Process>> {
        self.get_json(&format!("/apps/{app}/ps")).await
    }

    async fn restart(&self, app: &str, target: &ProcessTarget) -> Result<()> {
        let form: Vec<(&str, &str)> = target.param().into_iter().collect();
        self.call_form(Method::POST, &format!("/apps/{app}/ps/restart"), &form)
            .await
            .map(drop)
    }

    async fn scale(&self, app: &str, process_type: &str, qty: &str) -> Result<String> {
        let resp = self
            .call_form(
                Method::POST,
                &format!("/apps/{app}/ps/scale"),
                &[("type", process_type), ("qty", qty)],
            )
            .await?;
        read_text(resp).await
    }

    async fn stop(&self, app: &str, target: &ProcessTarget) -> Result<()> {
        let form: Vec<(&str, &str)> = target.param().into_iter().collect();
        self.call_form(Method::POST, &format!("/apps/{app}/ps/stop"), &form)
            .await
            .map(drop)
    }

    async fn set_dynos(&self, app: &str, qty: &str) -> Result<u64> {
        let resp = self
            .call_form(Method::PUT, &format!("/apps/{app}/dynos"), &[("dynos", qty)])
            .await?;
        let body = read_text(resp).await?;
        parse_count(&body, "dynos")
            .ok_or_else(|| ApiError::Decode(format!("dyno count: {body}")).into())
    }

    async fn set_workers(&self, app: &str, qty: &str) -> Result<u64> {
        let resp = self
            .call_form(Method::PUT, &format!("/apps/{app}/workers"), &[("workers", qty)])
            .await?;
        let body = read_text(resp).await?;
        parse_count(&body, "workers")
            .ok_or_else(|| ApiError::Decode(format!("worker count: {body}")).into())
    }
}
