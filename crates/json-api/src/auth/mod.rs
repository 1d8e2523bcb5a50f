//! Authentication and authorization middleware

pub(crate) mod admin;
pub(crate) mod middleware;
