//! # Lender Portal Settings
//!
//! The settings panel edits a local copy of these values and "saves" by
//! showing a toast. Nothing is written anywhere; closing the portal forgets
//! every change.

use serde::{Deserialize, Serialize};

use crate::notify::{Notification, Notifier};

/// The four settings tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsTab {
    Profile,
    Security,
    Preferences,
    Notifications,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 4] = [
        SettingsTab::Profile,
        SettingsTab::Security,
        SettingsTab::Preferences,
        SettingsTab::Notifications,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SettingsTab::Profile => "Profile",
            SettingsTab::Security => "Security",
            SettingsTab::Preferences => "Preferences",
            SettingsTab::Notifications => "Notifications",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderSettings {
    pub lender_name: String,
    pub license_number: String,
    pub contact_email: String,
    /// Minimum acceptable risk score, as typed (0–100 input).
    pub risk_threshold: String,
    pub auto_approval: bool,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    /// Display-only; there is no encryption to configure.
    pub encryption_level: String,
    pub api_access: bool,
}

impl Default for LenderSettings {
    fn default() -> Self {
        Self {
            lender_name: "Premier Capital Group".into(),
            license_number: "LIC-2024-001".into(),
            contact_email: "lending@premiercapital.com".into(),
            risk_threshold: "70".into(),
            auto_approval: false,
            email_notifications: true,
            sms_notifications: false,
            encryption_level: "AES-256".into(),
            api_access: true,
        }
    }
}

impl LenderSettings {
    /// The threshold as a number, when it parses and is within 0–100.
    pub fn risk_threshold_value(&self) -> Option<u8> {
        self.risk_threshold
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|v| *v <= 100)
    }

    /// "Saves" the settings: a confirmation toast, nothing persisted.
    pub fn save(&self, notifier: &dyn Notifier) {
        tracing::info!(lender = %self.lender_name, "settings saved (not persisted)");
        notifier.notify(Notification::info(
            "Settings Saved",
            "Your lender portal settings have been updated successfully.",
        ));
    }
}
