//! DateSpark - AI-assisted dating profile backend
//!
//! This crate implements the DateSpark backend: content generation for
//! dating profiles through an opaque completion service, and premium
//! billing through Razorpay with idempotent webhook processing.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
