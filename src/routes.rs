mod contact;

pub use contact::*;

use actix_web::{HttpResponse, Responder};

use crate::util::see_other;

pub async fn home() -> impl Responder {
    see_other("/contact")
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
}
