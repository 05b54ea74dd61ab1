pub mod account;
pub mod coach;
pub mod comment;
pub mod config;
pub mod workspace;
