//! Domain layer for the directory domain

pub mod entities;
