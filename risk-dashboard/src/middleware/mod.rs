//! Request middleware

pub mod resources;
