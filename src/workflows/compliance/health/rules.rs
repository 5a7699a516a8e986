use chrono::{Datelike, NaiveDate};

use super::super::domain::{
    annual_report_deadline, days_until_annual_deadline, Alert, AlertAction, AlertSeverity,
    EntitySnapshot, EntityVertical,
};
use super::config::HealthConfig;

/// Applies the deadline rules in fixed order, returning the stacked
/// deductions and the alerts in rule-evaluation order.
///
/// The caller has already handled the no-formation-date shortcut, so a
/// formation date is guaranteed present here.
pub(crate) fn run_rules(
    snapshot: &EntitySnapshot,
    as_of: NaiveDate,
    config: &HealthConfig,
) -> (u32, Vec<Alert>) {
    let mut deductions = 0u32;
    let mut alerts = Vec::new();

    let formation_year = snapshot.formation_date.map(|date| date.year());
    let filed_for_current_year = snapshot.last_filed_year == Some(as_of.year());

    if formation_year.is_some_and(|year| as_of.year() > year) && !filed_for_current_year {
        let deadline = annual_report_deadline(as_of.year());
        if as_of > deadline {
            deductions += config.annual_report_overdue_deduction;
            alerts.push(Alert {
                severity: AlertSeverity::Critical,
                title: "Annual Report Overdue".to_string(),
                body: format!(
                    "The {} annual report window closed on {deadline}. File for \
                     reinstatement to restore good standing.",
                    as_of.year()
                ),
                action: AlertAction::Reinstatement,
                link: None,
            });
        } else {
            let days_remaining = days_until_annual_deadline(as_of);
            deductions += config.annual_report_window_deduction;
            alerts.push(Alert {
                severity: AlertSeverity::Warning,
                title: "Annual Report Window Open".to_string(),
                body: format!(
                    "{days_remaining} day(s) remain to file the {} annual report \
                     before the May 1 deadline.",
                    as_of.year()
                ),
                action: AlertAction::AnnualReport,
                link: None,
            });
        }
    }

    if let Some(expiry) = snapshot.license_expiry {
        let diff_days = (expiry - as_of).num_days();
        let link = Some(renewal_link(snapshot.vertical, config));
        if diff_days < 0 {
            deductions += config.license_expired_deduction;
            alerts.push(Alert {
                severity: AlertSeverity::Critical,
                title: "License Expired".to_string(),
                body: format!(
                    "The professional license expired on {expiry}. Renew with the \
                     {} licensing authority immediately.",
                    snapshot.vertical.label().to_ascii_lowercase()
                ),
                action: AlertAction::LicenseRenewal,
                link,
            });
        } else if diff_days <= config.license_renewal_horizon_days {
            deductions += config.license_renewal_deduction;
            alerts.push(Alert {
                severity: AlertSeverity::Warning,
                title: "License Renewal Approaching".to_string(),
                body: format!(
                    "The professional license expires in {diff_days} day(s), on {expiry}."
                ),
                action: AlertAction::LicenseRenewal,
                link,
            });
        }
    }

    if !snapshot.has_agent_coverage() {
        deductions += config.missing_agent_deduction;
        alerts.push(Alert {
            severity: AlertSeverity::Info,
            title: "No Registered Agent On File".to_string(),
            body: "Service-of-process correspondence has no designated recipient. \
                   File a statement of change to appoint a registered agent."
                .to_string(),
            action: AlertAction::StatementOfChange,
            link: None,
        });
    }

    (deductions, alerts)
}

fn renewal_link(vertical: EntityVertical, config: &HealthConfig) -> String {
    match vertical {
        EntityVertical::Medical => config.medical_renewal_url.clone(),
        EntityVertical::General => config.general_renewal_url.clone(),
    }
}
