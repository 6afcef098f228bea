use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, spawn_app_with, with_complete_credentials, TestApp};

const SEND_PATH: &str = "/api/v1.0/email/send";

fn form_body(name: &str, email: &str, subject: &str, message: &str) -> String {
    serde_urlencoded::to_string([
        ("name", name),
        ("email", email),
        ("subject", subject),
        ("message", message),
    ])
    .unwrap()
}

async fn post_contact(app: &TestApp, body: String) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{}/contact", &app.address))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .expect("failed to execute request.")
}

async fn submission_status(app: &TestApp) -> serde_json::Value {
    reqwest::get(format!("{}/contact/status", &app.address))
        .await
        .expect("failed to execute request.")
        .json()
        .await
        .expect("failed to deserialize status body.")
}

#[tokio::test]
async fn valid_contact_submission_delivers_and_reports_success() {
    let app = spawn_app_with(with_complete_credentials).await;

    Mock::given(path(SEND_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = form_body(
        "Ada Lovelace",
        "ada@example.com",
        "Project Inquiry",
        "I would love to collaborate.",
    );
    let res = post_contact(&app, body).await;

    // 303重定向回表单页，页面反映成功状态
    assert_eq!(200, res.status().as_u16());
    let html = res.text().await.unwrap();
    assert!(html.contains("Message Sent!"));
    assert!(html.contains("Thank you! I&#39;ll get back to you soon.")
        || html.contains("Thank you! I'll get back to you soon."));

    let status = submission_status(&app).await;
    assert_eq!(status["status"], "success");
    assert_eq!(status["message"], "");

    // 成功后清空表单字段
    let fields = app.form.fields();
    assert_eq!(fields.name, "");
    assert_eq!(fields.message, "");

    // 投递请求携带凭据与完整的模板参数
    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();
    assert_eq!(body["service_id"], "service_demo");
    assert_eq!(body["template_id"], "template_demo");
    assert_eq!(body["user_id"], "public-key-demo");
    assert_eq!(body["template_params"]["from_name"], "Ada Lovelace");
    assert_eq!(body["template_params"]["from_email"], "ada@example.com");
    assert_eq!(body["template_params"]["subject"], "Project Inquiry");
    assert_eq!(
        body["template_params"]["message"],
        "I would love to collaborate."
    );
    assert_eq!(body["template_params"]["to_email"], "hello@elenamoreau.dev");
}

#[tokio::test]
async fn unconfigured_delivery_is_reported_without_a_network_attempt() {
    // 默认配置不携带投递凭据
    let app = spawn_app().await;

    let body = form_body("Ada Lovelace", "ada@example.com", "Hi", "Hello there");
    let res = post_contact(&app, body).await;
    assert_eq!(200, res.status().as_u16());

    let status = submission_status(&app).await;
    assert_eq!(status["status"], "error");
    let message = status["message"].as_str().unwrap();
    assert!(message.contains("not configured"), "{message}");

    // 无任何网络调用，失败时保留用户输入
    assert!(app.email_server.received_requests().await.unwrap().is_empty());
    assert_eq!(app.form.fields().name, "Ada Lovelace");
}

#[tokio::test]
async fn delivery_rejection_surfaces_the_service_text() {
    let app = spawn_app_with(with_complete_credentials).await;

    Mock::given(path(SEND_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Invalid template ID"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = form_body("Ada Lovelace", "ada@example.com", "Hi", "Hello there");
    post_contact(&app, body).await;

    let status = submission_status(&app).await;
    assert_eq!(status["status"], "error");
    assert_eq!(status["message"], "Error: Invalid template ID");
}

#[tokio::test]
async fn delivery_rejection_without_text_reports_the_status_code() {
    let app = spawn_app_with(with_complete_credentials).await;

    Mock::given(path(SEND_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = form_body("Ada Lovelace", "ada@example.com", "Hi", "Hello there");
    post_contact(&app, body).await;

    let status = submission_status(&app).await;
    assert_eq!(status["status"], "error");
    assert_eq!(
        status["message"],
        "delivery error (422). Please check your configuration."
    );
}

#[tokio::test]
async fn contact_page_renders_profile_and_form() {
    let app = spawn_app().await;

    let res = reqwest::get(format!("{}/contact", &app.address))
        .await
        .expect("failed to execute request.");
    assert!(res.status().is_success());

    let html = res.text().await.unwrap();
    assert!(html.contains("Elena Moreau"));
    assert!(html.contains("hello@elenamoreau.dev"));
    assert!(html.contains(r#"name="name""#));
    assert!(html.contains(r#"name="email""#));
    assert!(html.contains(r#"name="subject""#));
    assert!(html.contains(r#"name="message""#));
    assert!(html.contains("Send Message"));
}

#[tokio::test]
async fn home_redirects_to_the_contact_page() {
    let app = spawn_app().await;

    let res = reqwest::get(&app.address)
        .await
        .expect("failed to execute request.");
    assert!(res.status().is_success());
    assert!(res.url().path().ends_with("/contact"));
}
