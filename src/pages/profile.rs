use std::sync::LazyLock;

use regex::Regex;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{ChangePasswordInput, Profile, UpdateProfileInput};
use crate::pages::{PageAlerts, non_blank, require};
use crate::services::AccountService;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileForm {
    fn from_profile(profile: &Profile) -> Self {
        ProfileForm {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> ClientResult<UpdateProfileInput> {
        let name = require(&self.name, "Name")?;
        let email = require(&self.email, "Email")?;
        if !EMAIL_RE.is_match(&email) {
            return Err(ClientError::validation("Please enter a valid email address"));
        }

        Ok(UpdateProfileInput {
            name,
            email,
            phone: non_blank(&self.phone),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> ClientResult<ChangePasswordInput> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ClientError::validation("All password fields are required"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ClientError::validation(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if self.new_password != self.confirm_password {
            return Err(ClientError::validation("Passwords do not match"));
        }

        Ok(ChangePasswordInput {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

/// The signed-in user's profile with an edit mode that reverts on cancel
pub struct ProfilePage {
    service: AccountService,
    pub profile: Option<Profile>,
    pub editing: bool,
    pub form: ProfileForm,
    pub password_form: PasswordForm,
    pub loading: bool,
    pub saving: bool,
    pub alerts: PageAlerts,
}

impl ProfilePage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: AccountService::new(client),
            profile: None,
            editing: false,
            form: ProfileForm::default(),
            password_form: PasswordForm::default(),
            loading: false,
            saving: false,
            alerts: PageAlerts::default(),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let result = self.service.profile().await;
        self.loading = false;

        match result {
            Ok(profile) => {
                self.form = ProfileForm::from_profile(&profile);
                self.profile = Some(profile);
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load profile", &err),
        }
    }

    pub fn begin_edit(&mut self) {
        if let Some(profile) = &self.profile {
            self.form = ProfileForm::from_profile(profile);
            self.editing = true;
        }
    }

    /// Throw away local edits and show the last saved profile again
    pub fn cancel_edit(&mut self) {
        if let Some(profile) = &self.profile {
            self.form = ProfileForm::from_profile(profile);
        }
        self.editing = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|p| ProfileForm::from_profile(p) != self.form)
    }

    pub async fn save(&mut self) -> ClientResult<()> {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.alerts.fail("Profile form invalid", &err);
                return Err(err);
            }
        };

        self.saving = true;
        let result = self.service.update_profile(&input).await;
        self.saving = false;

        match result {
            Ok(profile) => {
                self.form = ProfileForm::from_profile(&profile);
                self.profile = Some(profile);
                self.editing = false;
                self.alerts.succeed("Profile updated");
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to update profile", &err);
                Err(err)
            }
        }
    }

    pub async fn change_password(&mut self) -> ClientResult<()> {
        let input = match self.password_form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.alerts.fail("Password form invalid", &err);
                return Err(err);
            }
        };

        self.saving = true;
        let result = self.service.change_password(&input).await;
        self.saving = false;

        match result {
            Ok(()) => {
                self.password_form = PasswordForm::default();
                self.alerts.succeed("Password changed");
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to change password", &err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profile_form_validation() {
        let mut form = ProfileForm {
            name: "Dana Reyes".to_string(),
            email: "dana@example.com".to_string(),
            phone: " ".to_string(),
        };
        assert_eq!(form.validate().unwrap().phone, None);

        form.email = "dana.example.com".to_string();
        assert_eq!(
            form.validate().unwrap_err().display_message(),
            "Please enter a valid email address"
        );

        form.name.clear();
        assert_eq!(
            form.validate().unwrap_err().display_message(),
            "Name is required"
        );
    }

    #[test]
    fn test_password_form_validation() {
        let mut form = PasswordForm {
            current_password: "old-secret".to_string(),
            new_password: "new-secret-1".to_string(),
            confirm_password: "new-secret-2".to_string(),
        };
        assert_eq!(
            form.validate().unwrap_err().display_message(),
            "Passwords do not match"
        );

        form.new_password = "short".to_string();
        form.confirm_password = "short".to_string();
        assert!(form.validate().is_err());

        form.new_password = "long-enough".to_string();
        form.confirm_password = "long-enough".to_string();
        assert_eq!(form.validate().unwrap().new_password, "long-enough");

        form.current_password.clear();
        assert_eq!(
            form.validate().unwrap_err().display_message(),
            "All password fields are required"
        );
    }
}
