use secrecy::{ExposeSecret, SecretString};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub email_delivery: EmailDeliveryConfig,
    pub profile_path: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailDeliveryConfig {
    pub base_url: String,
    pub timeout_milliseconds: u64,
    pub credentials: DeliveryCredentials,
}

/// 邮件投递服务所需的三个凭据
/// 由部署环境提供，进程生命周期内不变
#[derive(serde::Deserialize, Clone)]
pub struct DeliveryCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: SecretString,
}

impl DeliveryCredentials {
    /// 任一凭据为空即视为配置不完整
    /// 属于配置前置条件失败，而非网络失败
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty()
            && !self.template_id.is_empty()
            && !self.public_key.expose_secret().is_empty()
    }
}

pub fn config() -> Config {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml))
        // 部署环境通过`APP_`前缀的环境变量补充投递凭据
        // 例: APP_EMAIL_DELIVERY__CREDENTIALS__SERVICE_ID
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()
        .expect("failed to read config.yaml.")
        .try_deserialize::<Config>()
        .expect("failed to deserialize config.yaml.")
}
