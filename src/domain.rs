mod owner_email;
mod profile;

pub use owner_email::OwnerEmail;
pub use profile::{PersonalInfo, Profile, ProfileError, SocialLinks};
