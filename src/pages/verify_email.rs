use std::time::Duration;

use crate::api::ApiClient;
use crate::services::AccountService;

pub const LOGIN_ROUTE: &str = "/login";
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Idle,
    Verifying,
    Verified(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    pub after: Duration,
}

/// One-shot email verification from a link token
pub struct VerifyEmailPage {
    service: AccountService,
    attempted: bool,
    pub status: VerificationStatus,
    pub redirect: Option<Redirect>,
}

impl VerifyEmailPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: AccountService::new(client),
            attempted: false,
            status: VerificationStatus::Idle,
            redirect: None,
        }
    }

    /// Verify `token`; only the first call does anything
    pub async fn mount(&mut self, token: &str) {
        if self.attempted {
            return;
        }
        self.attempted = true;

        let token = token.trim();
        if token.is_empty() {
            log::warn!("Email verification opened without a token");
            self.status = VerificationStatus::Failed("Invalid verification link".to_string());
            return;
        }

        self.status = VerificationStatus::Verifying;
        match self.service.verify_email(token).await {
            Ok(result) => {
                log::info!("Email verified");
                self.status = VerificationStatus::Verified(result.message);
                self.redirect = Some(Redirect {
                    to: LOGIN_ROUTE,
                    after: REDIRECT_DELAY,
                });
            }
            Err(err) => {
                log::error!("Email verification failed: {}", err);
                self.status = VerificationStatus::Failed(err.display_message());
            }
        }
    }
}
