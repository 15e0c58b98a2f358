//! Core business logic for the admin back-end

pub mod bulk;
