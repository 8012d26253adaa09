//! Plain-text views of the portal screens.
//!
//! Each view borrows the state it shows and implements `Display`, so the
//! binary prints them and the tests compare their output.

use std::fmt;

use vault_lender::application::{ApplicationForm, Field, Step};
use vault_lender::dashboard::{self, Dashboard, Trend};
use vault_lender::report::{LockControl, ReportCard};
use vault_lender::settings::{LenderSettings, SettingsTab};

const RULE: &str = "--------------------------------------------------------------------";

/// The whole lender dashboard.
pub struct DashboardView<'a>(pub &'a Dashboard);

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = self.0;

        writeln!(f, "{}  |  {}", dashboard::PORTAL_TITLE, dashboard::PORTAL_SUBTITLE)?;
        writeln!(f, "{RULE}")?;
        for stat in dash.stats() {
            writeln!(
                f,
                "{:<22}{:>8}   {} from last month",
                stat.title, stat.value, stat.trend
            )?;
        }

        writeln!(f, "{RULE}")?;
        writeln!(f, "{}", dashboard::WALLET_PANEL_TITLE)?;
        match dash.wallet().address() {
            Some(address) => writeln!(f, "  Connected Address: {}", address.short())?,
            None => writeln!(f, "  {}", dashboard::WALLET_PANEL_HINT)?,
        }
        writeln!(f)?;
        writeln!(f, "{}", dashboard::SECURITY_NOTICE)?;

        writeln!(f, "{RULE}")?;
        for card in dash.cards() {
            write!(f, "{}", CardView(card))?;
            writeln!(f)?;
        }

        writeln!(f, "{RULE}")?;
        writeln!(f, "{}", dashboard::FOOTER_TITLE)?;
        let strip: Vec<String> = dash
            .cashflow()
            .iter()
            .map(|p| {
                let arrow = match p.trend {
                    Trend::Up => '↑',
                    Trend::Down => '↓',
                };
                format!("{} {} {}", p.month, p.display_value(), arrow)
            })
            .collect();
        writeln!(f, "  {}", strip.join("  "))?;
        writeln!(f, "  {}", dashboard::FOOTER_SUBTITLE)?;
        writeln!(f, "{}", dashboard::FOOTER_COPYRIGHT)
    }
}

/// One encrypted report card.
pub struct CardView<'a>(pub &'a ReportCard);

impl fmt::Display for CardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let app = self.0.application();
        let fields = self.0.render();
        let lock = match fields.lock {
            LockControl::Toggle { unlocked: true } => "[unlocked]",
            LockControl::Toggle { unlocked: false } => "[locked, toggle]",
            LockControl::Locked => "[locked]",
        };

        writeln!(f, "{} ({})  {}", app.company_name, app.application_id, lock)?;
        writeln!(f, "  Revenue        {}", fields.revenue)?;
        writeln!(f, "  Profit         {}", fields.profit)?;
        writeln!(f, "  Cashflow       {}", fields.cashflow)?;
        writeln!(f, "  Credit Rating  {}", fields.credit_rating)?;
        writeln!(f, "  Risk Score     {}  {}", fields.risk_score, fields.risk_label)?;
        if let Some(notice) = fields.notice {
            writeln!(f, "  {notice}")?;
        }
        Ok(())
    }
}

/// The current step of the application form.
pub struct FormStepView<'a>(pub &'a ApplicationForm);

impl fmt::Display for FormStepView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;
        let step = form.step();
        writeln!(f, "{}", form.progress_label())?;
        writeln!(f, "{}: {}", step.title(), step.description())?;
        for (field, value) in form.visible_fields() {
            let marker = if field.is_required() { " *" } else { "" };
            writeln!(f, "  {}{}: {}", field.label(), marker, value)?;
        }
        if step == Step::ContactReview {
            let review = form.draft().review();
            writeln!(f, "Application Summary")?;
            writeln!(f, "  Company: {}", review.company)?;
            writeln!(f, "  Loan Amount: {}", review.loan_amount)?;
            writeln!(f, "  Term: {}", review.term)?;
            writeln!(f, "  Purpose: {}", review.purpose)?;
            let missing = form.draft().missing_required();
            if !missing.is_empty() {
                let labels: Vec<&str> = missing.iter().map(Field::label).collect();
                writeln!(f, "  Blank required fields: {}", labels.join(", "))?;
            }
        }
        write!(f, "[{}]  [{}]", form.back_label(), form.forward_label())
    }
}

/// The settings panel, every tab in order.
pub struct SettingsView<'a>(pub &'a LenderSettings);

impl fmt::Display for SettingsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let on_off = |b: bool| if b { "on" } else { "off" };
        for tab in SettingsTab::ALL {
            writeln!(f, "[{}]", tab.title())?;
            match tab {
                SettingsTab::Profile => {
                    writeln!(f, "  Lender Name: {}", s.lender_name)?;
                    writeln!(f, "  License Number: {}", s.license_number)?;
                    writeln!(f, "  Contact Email: {}", s.contact_email)?;
                }
                SettingsTab::Security => {
                    writeln!(f, "  Encryption Level: {}", s.encryption_level)?;
                    writeln!(f, "  API Access: {}", on_off(s.api_access))?;
                }
                SettingsTab::Preferences => {
                    writeln!(f, "  Minimum Risk Score Threshold: {}", s.risk_threshold)?;
                    writeln!(f, "  Auto-Approval: {}", on_off(s.auto_approval))?;
                }
                SettingsTab::Notifications => {
                    writeln!(f, "  Email Notifications: {}", on_off(s.email_notifications))?;
                    writeln!(f, "  SMS Notifications: {}", on_off(s.sms_notifications))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vault_lender::dashboard::DashboardEvent;
    use vault_lender::notify::NotificationLog;
    use vault_lender::wallet::WalletSession;

    fn dashboard(wallet: WalletSession) -> Dashboard {
        Dashboard::new(wallet, Arc::new(NotificationLog::new()))
    }

    #[test]
    fn dashboard_hides_approved_reports_until_decrypted() {
        let mut dash = dashboard(WalletSession::disconnected());
        let before = DashboardView(&dash).to_string();
        assert!(!before.contains("$2.4M"));
        assert!(before.contains("$1.8M"));
        assert!(before.contains("Jan ████ ↑"));
        assert!(before.contains("Mar $2.1M ↑"));

        dash.apply(DashboardEvent::ToggleDecrypt("SME-2024-001".into()));
        let after = DashboardView(&dash).to_string();
        assert!(after.contains("$2.4M"));
        assert!(after.contains("85/100  Low Risk"));
    }

    #[test]
    fn wallet_panel_shows_short_address() {
        let wallet =
            WalletSession::connected("0x742d35Cc6634C0532925a3b8D097aA4B9c4FD87A".parse().unwrap());
        let text = DashboardView(&dashboard(wallet)).to_string();
        assert!(text.contains("Connected Address: 0x742d...D87A"));
    }

    #[test]
    fn review_step_lists_blank_fields() {
        let mut form = ApplicationForm::new();
        form.update(Field::CompanyName, "Acme").unwrap();
        for _ in 0..3 {
            form.next();
        }
        let text = FormStepView(&form).to_string();
        assert!(text.starts_with("Step 4 of 4 (100% Complete)"));
        assert!(text.contains("Company: Acme"));
        assert!(text.contains("Loan Amount: $0"));
        assert!(text.contains("Purpose: Not specified"));
        assert!(text.contains("Blank required fields: Registration Number"));
        assert!(text.ends_with("[Previous]  [Submit Application]"));
    }

    #[test]
    fn settings_shows_every_tab() {
        let text = SettingsView(&LenderSettings::default()).to_string();
        for tab in SettingsTab::ALL {
            assert!(text.contains(&format!("[{}]", tab.title())));
        }
        assert!(text.contains("Premier Capital Group"));
        assert!(text.contains("Auto-Approval: off"));
    }
}
