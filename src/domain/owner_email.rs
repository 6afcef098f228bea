use validator::ValidateEmail;

/// 站长的通知邮箱，来自静态档案数据
#[derive(Debug, Clone)]
pub struct OwnerEmail(String);

impl OwnerEmail {
    pub fn parse(s: &str) -> Result<OwnerEmail, String> {
        if s.validate_email() {
            Ok(Self(s.into()))
        } else {
            tracing::error!("`{s}` is not a valid owner email.");
            Err(format!("`{s}` is not a valid owner email."))
        }
    }
}

impl AsRef<str> for OwnerEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
