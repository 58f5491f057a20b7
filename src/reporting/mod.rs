//! Reporting
//!
//! Structured logging for the application. Diagnostics go to stderr so
//! stdout carries nothing but accepted URLs.

pub mod logging;
