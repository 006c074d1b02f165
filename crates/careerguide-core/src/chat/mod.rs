//! Chat session and message abstractions for CareerGuide.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, and the `ChatService` that orchestrates user
//! materialization, session lifecycle, and message persistence on top of it.

pub mod repository;
pub mod service;
