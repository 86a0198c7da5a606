use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::form::ContactForm;
use super::service::EmailDispatcher;
use crate::error::DeliveryError;

const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Credentials and endpoint for the EmailJS REST API.
#[derive(Clone, Debug)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl EmailJsConfig {
    #[must_use]
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `GLOSSARY_EMAILJS_*` variables. Returns `None` unless the
    /// service id, template id and public key are all present.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let required = |key: &str| {
            env::var(key)
                .ok()
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::new(
            required("GLOSSARY_EMAILJS_SERVICE_ID")?,
            required("GLOSSARY_EMAILJS_TEMPLATE_ID")?,
            required("GLOSSARY_EMAILJS_PUBLIC_KEY")?,
        );
        if let Some(endpoint) = required("GLOSSARY_EMAILJS_ENDPOINT") {
            config.endpoint = endpoint;
        }
        let timeout_secs =
            required("GLOSSARY_EMAILJS_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok());
        if let Some(secs) = timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        Some(config)
    }
}

/// Sends contact messages through EmailJS.
#[derive(Clone)]
pub struct EmailJsDispatcher {
    client: Client,
    config: Option<EmailJsConfig>,
}

impl EmailJsDispatcher {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(EmailJsConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<EmailJsConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl EmailDispatcher for EmailJsDispatcher {
    async fn send(&self, form: &ContactForm) -> Result<(), DeliveryError> {
        let config = self.config.as_ref().ok_or(DeliveryError::NotConfigured)?;

        let payload = SendRequest {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: form,
        };

        let response = self
            .client
            .post(&config.endpoint)
            .timeout(config.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::HttpStatus { status, body });
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactForm,
}
