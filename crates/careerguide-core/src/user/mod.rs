//! User persistence abstractions for CareerGuide.
//!
//! Defines the `UserRepository` trait the infrastructure layer implements.
//! Users are materialized from external identity claims; no creation or
//! authentication logic lives here.

pub mod repository;
