//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (rzp_test_... or rzp_live_...)
    pub razorpay_key_id: String,

    /// Razorpay key secret
    pub razorpay_key_secret: String,

    /// Razorpay webhook signing secret
    pub razorpay_webhook_secret: String,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_SECRET"));
        }
        // The webhook handler fails closed without a secret; refuse to
        // start without one rather than reject every delivery at runtime
        if self.razorpay_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_WEBHOOK_SECRET"));
        }

        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }

        Ok(())
    }
}
