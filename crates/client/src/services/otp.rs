//! Phone verification over SMS or WhatsApp.
//!
//! Two delivery channels share one flow: send a code, verify the echo. The
//! code format is checked locally before the verify call so a typo fails
//! inline instead of burning a backend attempt.

use grocerly_core::Phone;
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::{ClientError, Result};

/// Transport the verification code travels over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpChannel {
    /// Plain SMS.
    Sms,
    /// WhatsApp message.
    WhatsApp,
}

/// Accepted verification code shape: 4 to 6 digits.
fn valid_code(code: &str) -> bool {
    (4..=6).contains(&code.len()) && code.chars().all(|c| c.is_ascii_digit())
}

/// OTP operations.
pub struct OtpService<'a> {
    api: &'a ApiClient,
}

impl<'a> OtpService<'a> {
    pub(crate) const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Send a verification code to `phone` over the chosen channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    #[instrument(skip(self))]
    pub async fn send_code(&self, phone: &Phone, channel: OtpChannel) -> Result<()> {
        match channel {
            OtpChannel::Sms => self.api.sms_send(phone.as_str()).await?,
            OtpChannel::WhatsApp => self.api.otp_send(phone.as_str()).await?,
        }
        Ok(())
    }

    /// Verify a code the user received.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed codes; otherwise any
    /// backend failure.
    #[instrument(skip(self, code))]
    pub async fn verify_code(
        &self,
        phone: &Phone,
        code: &str,
        channel: OtpChannel,
    ) -> Result<bool> {
        let code = code.trim();
        if !valid_code(code) {
            return Err(ClientError::validation(
                "Verification code must be 4-6 digits",
            ));
        }

        let response = match channel {
            OtpChannel::Sms => self.api.sms_verify(phone.as_str(), code).await?,
            OtpChannel::WhatsApp => self.api.otp_verify(phone.as_str(), code).await?,
        };
        Ok(response.verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_code_shapes() {
        assert!(valid_code("1234"));
        assert!(valid_code("123456"));
        assert!(!valid_code("123"));
        assert!(!valid_code("1234567"));
        assert!(!valid_code("12a4"));
        assert!(!valid_code(""));
    }
}
