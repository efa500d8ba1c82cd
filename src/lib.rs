//! Client library for the RFID textile MES backend.
//!
//! All traffic goes through [`transport::http_client::ApiClient`], which
//! attaches the ambient session cookies to every request and transparently
//! renews an expired session: a 401 triggers a single call to the refresh
//! endpoint followed by a single replay of the original request. Everything
//! else is typed services over the backend's JSON endpoints.

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod session;

pub mod transport;

pub mod utils;
