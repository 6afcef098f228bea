use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{contact::ContactForm, domain::Profile, routes};

pub fn run(
    listener: TcpListener,
    form: web::Data<ContactForm>,
    profile: web::Data<Profile>,
) -> Server {
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(form.clone())
            .app_data(profile.clone())
            .route("/", web::get().to(routes::home))
            .route("/health_check", web::get().to(routes::health_check))
            .route("/contact", web::get().to(routes::contact_form))
            .route("/contact", web::post().to(routes::contact_submit))
            .route("/contact/status", web::get().to(routes::contact_status))
    })
    .listen(listener)
    .expect("failed to bind web port.")
    .run()
}
