use serde::{Deserialize, Serialize};

/// Deduction weights and thresholds applied by the health evaluator.
///
/// The defaults carry the statutory tuning the product ships with; deployments
/// override individual fields rather than editing rule code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    pub annual_report_overdue_deduction: u32,
    pub annual_report_window_deduction: u32,
    pub license_expired_deduction: u32,
    pub license_renewal_deduction: u32,
    pub license_renewal_horizon_days: i64,
    pub missing_agent_deduction: u32,
    pub medical_renewal_url: String,
    pub general_renewal_url: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            annual_report_overdue_deduction: 60,
            annual_report_window_deduction: 20,
            license_expired_deduction: 80,
            license_renewal_deduction: 30,
            license_renewal_horizon_days: 90,
            missing_agent_deduction: 15,
            medical_renewal_url: "https://medicalboard.state.gov/renewals".to_string(),
            general_renewal_url: "https://licensing.state.gov/renewals".to_string(),
        }
    }
}
