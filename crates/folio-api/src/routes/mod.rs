//! # API Route Modules
//!
//! - `contact`: contact form submission, rate limited per client
//! - `suggest`: drafted reply suggestions, rate limited per client
//! - `projects`: read-only project catalog listing and lookup

pub mod contact;
pub mod projects;
pub mod suggest;
