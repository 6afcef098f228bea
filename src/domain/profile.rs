use std::fmt::Debug;
use std::path::Path;

use crate::util::error_chain_fmt;

use super::OwnerEmail;

/// 静态档案数据中联系板块用到的部分
#[derive(serde::Deserialize, Clone, Debug)]
pub struct Profile {
    pub personal_info: PersonalInfo,
    pub social: SocialLinks,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
}

impl Profile {
    pub fn load(path: impl AsRef<Path>) -> Result<Profile, ProfileError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let profile = serde_json::from_str(&raw)?;

        Ok(profile)
    }

    /// 通知邮件的收件地址，读取自档案而非配置
    pub fn owner_email(&self) -> Result<OwnerEmail, String> {
        OwnerEmail::parse(&self.personal_info.email)
    }
}

#[derive(thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read profile data from `{path}`.")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize profile data.")]
    Parse(#[from] serde_json::Error),
}

impl Debug for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
