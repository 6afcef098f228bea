pub mod config;
pub mod contact;
mod domain;
pub mod email_client;
mod routes;
mod startup;
pub mod telemetry;
mod util;

pub use domain::{OwnerEmail, PersonalInfo, Profile, SocialLinks};
pub use startup::run;
