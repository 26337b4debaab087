//! HTTP handlers

pub mod health;
pub mod dashboard;
pub mod evaluate;
pub mod features;
pub mod model;
