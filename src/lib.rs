//! Stateless HTTP proxy that forwards prompts to the Gemini API.
//!
//! The service exposes a single `/generate` endpoint that shapes an
//! upstream `generateContent` request (fixed permissive safety settings,
//! optional search grounding, optional system instruction) and relays the
//! first candidate's text back to the caller.

pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod services;
pub mod startup;
