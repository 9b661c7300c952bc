//! gemini-relay - minimal web backend for the Gemini API
//!
//! Serves a landing page and a `/chat` endpoint that forwards a prompt to
//! Gemini. The API key is resolved per request from a local override file,
//! then the process environment.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod provider;
pub mod settings;
pub mod telemetry;
