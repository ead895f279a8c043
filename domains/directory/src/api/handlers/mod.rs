//! HTTP handlers for the directory domain

pub mod auth;
pub mod contacts;
pub mod emails;
