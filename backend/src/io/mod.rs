//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handlers
//! translate requests into domain commands, call a service, and map the result
//! (or the domain error) back to an HTTP response.

pub mod rest;
