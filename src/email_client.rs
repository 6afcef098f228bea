use std::time::Duration;

use secrecy::ExposeSecret;

use crate::config::{DeliveryCredentials, EmailDeliveryConfig};

const SEND_PATH: &str = "/api/v1.0/email/send";

pub struct EmailClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    credentials: DeliveryCredentials,
}

impl EmailClient {
    fn new(base_url: &str, timeout: Duration, credentials: DeliveryCredentials) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build email client.");
        let base_url = reqwest::Url::parse(base_url).expect("failed to parse base url.");

        Self {
            client,
            base_url,
            credentials,
        }
    }

    pub fn from_config(config: &EmailDeliveryConfig) -> Self {
        let timeout = Duration::from_millis(config.timeout_milliseconds);
        Self::new(&config.base_url, timeout, config.credentials.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_complete()
    }

    /// 单次原子请求，不重试、不分块
    /// 任何失败都以[`DeliveryFault`]结算
    #[tracing::instrument(name = "delivering contact message", skip_all)]
    pub async fn send(&self, payload: &MessagePayload<'_>) -> Result<(), DeliveryFault> {
        let url = self.base_url.join(SEND_PATH).expect("failed to build send url.");
        let body = SendRequestBody {
            service_id: &self.credentials.service_id,
            template_id: &self.credentials.template_id,
            user_id: self.credentials.public_key.expose_secret(),
            template_params: payload,
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(DeliveryFault::from_transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // 上游服务的错误响应为纯文本
        let text = response.text().await.unwrap_or_default();
        Err(DeliveryFault::from_response(status.as_u16(), text))
    }
}

#[derive(serde::Serialize)]
pub struct MessagePayload<'a> {
    pub from_name: &'a str,
    pub from_email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub to_email: &'a str,
}

#[derive(serde::Serialize)]
struct SendRequestBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a MessagePayload<'a>,
}

/// 投递调用结算的故障对象
/// 上游服务不保证任何固定形状，三个字段均可能缺失
#[derive(Debug, Default)]
pub struct DeliveryFault {
    pub text: Option<String>,
    pub message: Option<String>,
    pub status: Option<u16>,
}

impl DeliveryFault {
    fn from_transport(e: reqwest::Error) -> Self {
        Self {
            text: None,
            message: Some(e.to_string()),
            status: e.status().map(|s| s.as_u16()),
        }
    }

    fn from_response(status: u16, body: String) -> Self {
        let body = body.trim();
        Self {
            text: (!body.is_empty()).then(|| body.to_owned()),
            message: None,
            status: Some(status),
        }
    }
}

impl std::fmt::Display for DeliveryFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(text) = &self.text {
            write!(f, "delivery rejected: {text}")
        } else if let Some(message) = &self.message {
            write!(f, "delivery failed: {message}")
        } else if let Some(status) = self.status {
            write!(f, "delivery failed with status {status}")
        } else {
            write!(f, "delivery failed.")
        }
    }
}

impl std::error::Error for DeliveryFault {}
