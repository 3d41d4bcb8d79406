pub mod admin;
pub mod auth;
pub mod backend;
pub mod documents;
pub mod photos;
pub mod router;
pub mod spa;
pub mod users;
