//! Plain HTTP and TLS servers for the application router

pub mod http;
pub mod https;
