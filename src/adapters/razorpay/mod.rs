//! Razorpay payment gateway adapter.

mod client;

pub use client::{RazorpayClient, RazorpayClientConfig};
