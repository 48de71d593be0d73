pub mod accounts;
pub mod bank;
pub mod landing;
