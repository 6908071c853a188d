//! HTTP surface for the project resource.

pub(crate) mod handlers;
pub(crate) mod request_log;
pub(crate) mod response;
