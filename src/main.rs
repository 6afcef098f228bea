use std::net::TcpListener;

use actix_web::web;
use anyhow::Context;
use portfolio::{contact::ContactForm, email_client::EmailClient, telemetry, Profile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 遥测初始化
    telemetry::init_subscriber("portfolio");

    let config = portfolio::config::config();
    let listener =
        TcpListener::bind(config.web.server_address()).context("failed to bind web port.")?;

    let profile =
        Profile::load(&config.profile_path).context("failed to load profile data.")?;
    let owner_email = profile
        .owner_email()
        .map_err(|e| anyhow::anyhow!(e))
        .context("profile data carries an invalid owner email.")?;

    let email_client = EmailClient::from_config(&config.email_delivery);
    if !email_client.is_configured() {
        tracing::warn!("delivery credentials are incomplete, submissions will be rejected.");
    }

    let form = web::Data::new(ContactForm::new(email_client, owner_email));
    let profile = web::Data::new(profile);

    portfolio::run(listener, form, profile).await?;

    Ok(())
}
