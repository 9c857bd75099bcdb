mod diagnosis;
mod image;
mod location;
mod user;

pub use diagnosis::{Diagnosis, Temperature};
pub use image::{ImageError, ImageUpload};
pub use location::Coordinates;
pub use user::User;
