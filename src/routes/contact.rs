use actix_web::{http::header::ContentType, web, HttpResponse, Responder};

use crate::{
    contact::{ContactForm, FieldName, SubmissionStatus},
    domain::Profile,
    util::{escape_html, see_other},
};

#[derive(serde::Deserialize)]
pub struct FormData {
    name: String,
    email: String,
    subject: String,
    message: String,
}

/// 渲染联系表单
/// 提交按钮的文案与可用性、结果区域均由提交状态决定
pub async fn contact_form(
    form: web::Data<ContactForm>,
    profile: web::Data<Profile>,
) -> impl Responder {
    let fields = form.fields();
    let status = form.status();

    let submit_label = match &status {
        SubmissionStatus::Sending => "Sending...",
        SubmissionStatus::Success => "Message Sent!",
        _ => "Send Message",
    };
    let submit_disabled = if status == SubmissionStatus::Sending {
        "disabled"
    } else {
        ""
    };
    let results = match &status {
        SubmissionStatus::Success => {
            r#"<p class="success">Thank you! I'll get back to you soon.</p>"#.to_owned()
        }
        SubmissionStatus::Error(message) => {
            format!(r#"<p class="error">{}</p>"#, escape_html(message))
        }
        _ => String::new(),
    };

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            include_str!("contact.html"),
            owner_name = profile.personal_info.name,
            owner_title = profile.personal_info.title,
            owner_email = profile.personal_info.email,
            owner_phone = profile.personal_info.phone,
            owner_location = profile.personal_info.location,
            github = profile.social.github,
            linkedin = profile.social.linkedin,
            twitter = profile.social.twitter,
            name = escape_html(&fields.name),
            email = escape_html(&fields.email),
            subject = escape_html(&fields.subject),
            message = escape_html(&fields.message),
            submit_label = submit_label,
            submit_disabled = submit_disabled,
            results = results,
        ))
}

/// 浏览器端`required`校验保证各字段非空，这里不再重复校验
#[tracing::instrument(
    name = "handling contact submission",
    skip_all,
    fields(
        %form.name,
        %form.email
    )
)]
pub async fn contact_submit(
    form: web::Form<FormData>,
    contact: web::Data<ContactForm>,
) -> impl Responder {
    let FormData {
        name,
        email,
        subject,
        message,
    } = form.0;
    contact.update_field(FieldName::Name, name);
    contact.update_field(FieldName::Email, email);
    contact.update_field(FieldName::Subject, subject);
    contact.update_field(FieldName::Message, message);
    contact.submit().await;

    see_other("/contact")
}

/// 提交状态的机器可读视图
pub async fn contact_status(form: web::Data<ContactForm>) -> impl Responder {
    let status = form.status();
    let message = match &status {
        SubmissionStatus::Error(message) => message.clone(),
        _ => String::new(),
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": status.as_str(),
        "message": message,
    }))
}
