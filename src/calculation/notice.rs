//! Notice period (aviso prévio) calculation.
//!
//! The notice period grows with tenure: a base of 30 days plus 3 days per
//! complete year of service, up to 90 days. When the notice is indemnified
//! the whole period is paid and projects the termination date forward; when
//! it is worked only the days beyond the base are paid and projected.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::calendar::day_difference;
use super::salary_balance::COMMERCIAL_MONTH_DAYS;
use crate::config::NoticeRules;
use crate::models::{AuditStep, NoticeModality};

/// Legal reference for proportional notice.
pub const NOTICE_LEGAL_REF: &str = "CLT art. 487; Lei 12.506/2011";

/// The result of the notice period calculation.
#[derive(Debug, Clone)]
pub struct NoticeResult {
    /// Complete years of service.
    pub years_of_service: u32,
    /// Notice period owed by tenure.
    pub notice_days: u32,
    /// Days paid in lieu of notice.
    pub indemnified_days: u32,
    /// Pay for the indemnified days.
    pub notice_pay: Decimal,
    /// Termination date after projecting the indemnified days.
    pub projected_date: NaiveDate,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Complete years between hire and termination, using 365.25-day years.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::years_of_service;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let termination = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
/// assert_eq!(years_of_service(hire, termination), 2);
/// ```
pub fn years_of_service(hire_date: NaiveDate, termination_date: NaiveDate) -> u32 {
    let days = day_difference(termination_date, hire_date);
    u32::try_from(days * 100 / 36525).unwrap_or(u32::MAX)
}

/// Notice period length for a given tenure.
pub fn notice_days(years_of_service: u32, rules: &NoticeRules) -> u32 {
    rules
        .days_per_year
        .saturating_mul(years_of_service)
        .saturating_add(rules.base_days)
        .min(rules.max_days)
}

/// Calculates notice days, notice pay and the projected termination date.
///
/// # Arguments
///
/// * `salary_total` - Monthly salary plus allowance
/// * `hire_date` - First day of employment
/// * `termination_date` - Last day of employment
/// * `modality` - Whether the notice is worked or indemnified
/// * `rules` - Notice period rules
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_notice(
    salary_total: Decimal,
    hire_date: NaiveDate,
    termination_date: NaiveDate,
    modality: NoticeModality,
    rules: &NoticeRules,
    step_number: u32,
) -> NoticeResult {
    let years = years_of_service(hire_date, termination_date);
    let notice_days = notice_days(years, rules);

    let indemnified_days = match modality {
        NoticeModality::Indemnified => notice_days,
        NoticeModality::Worked => notice_days.saturating_sub(rules.base_days),
    };

    let daily_rate = salary_total / Decimal::from(COMMERCIAL_MONTH_DAYS);
    let notice_pay = daily_rate * Decimal::from(indemnified_days);
    let projected_date = termination_date
        .checked_add_days(Days::new(u64::from(indemnified_days)))
        .unwrap_or(NaiveDate::MAX);

    let reasoning = match modality {
        NoticeModality::Indemnified => format!(
            "{} years of service give {} notice days, all indemnified: R${} / 30 x {} = R${}; projected to {}",
            years,
            notice_days,
            salary_total.normalize(),
            indemnified_days,
            notice_pay.normalize(),
            projected_date
        ),
        NoticeModality::Worked if indemnified_days > 0 => format!(
            "{} years of service give {} notice days; {} worked, {} beyond the base paid: R${} / 30 x {} = R${}; projected to {}",
            years,
            notice_days,
            rules.base_days,
            indemnified_days,
            salary_total.normalize(),
            indemnified_days,
            notice_pay.normalize(),
            projected_date
        ),
        NoticeModality::Worked => format!(
            "{} years of service give {} notice days, all worked; nothing paid in lieu",
            years, notice_days
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "notice_period".to_string(),
        rule_name: "Notice Period".to_string(),
        legal_ref: NOTICE_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "salary_total": salary_total.normalize().to_string(),
            "hire_date": hire_date.to_string(),
            "termination_date": termination_date.to_string(),
            "modality": modality.as_str()
        }),
        output: serde_json::json!({
            "years_of_service": years,
            "notice_days": notice_days,
            "indemnified_days": indemnified_days,
            "notice_pay": notice_pay.normalize().to_string(),
            "projected_date": projected_date.to_string()
        }),
        reasoning,
    };

    NoticeResult {
        years_of_service: years,
        notice_days,
        indemnified_days,
        notice_pay,
        projected_date,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules() -> NoticeRules {
        *RuleSet::default().notice()
    }

    #[test]
    fn test_years_of_service_uses_quarter_day_years() {
        assert_eq!(years_of_service(date(2023, 1, 1), date(2025, 3, 15)), 2);
        assert_eq!(years_of_service(date(2020, 6, 10), date(2024, 12, 10)), 4);
        // 365 days is short of a 365.25-day year
        assert_eq!(years_of_service(date(2023, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(years_of_service(date(2023, 1, 1), date(2024, 1, 2)), 1);
    }

    #[test]
    fn test_notice_days_scale_and_cap() {
        let rules = rules();
        assert_eq!(notice_days(0, &rules), 30);
        assert_eq!(notice_days(2, &rules), 36);
        assert_eq!(notice_days(20, &rules), 90);
        assert_eq!(notice_days(35, &rules), 90);
    }

    /// Worked notice pays only the days beyond the base 30.
    #[test]
    fn test_worked_notice_pays_excess_days() {
        let result = calculate_notice(
            dec("3000"),
            date(2023, 1, 1),
            date(2025, 3, 15),
            NoticeModality::Worked,
            &rules(),
            2,
        );

        assert_eq!(result.notice_days, 36);
        assert_eq!(result.indemnified_days, 6);
        assert_eq!(result.notice_pay, dec("600"));
        assert_eq!(result.projected_date, date(2025, 3, 21));
    }

    #[test]
    fn test_worked_notice_without_excess_pays_nothing() {
        let result = calculate_notice(
            dec("3000"),
            date(2024, 6, 1),
            date(2025, 3, 15),
            NoticeModality::Worked,
            &rules(),
            2,
        );

        assert_eq!(result.notice_days, 30);
        assert_eq!(result.notice_pay, Decimal::ZERO);
        assert_eq!(result.projected_date, date(2025, 3, 15));
        assert!(result.audit_step.reasoning.contains("nothing paid"));
    }

    #[test]
    fn test_indemnified_notice_pays_and_projects_all_days() {
        let result = calculate_notice(
            dec("3000"),
            date(2020, 6, 10),
            date(2024, 12, 10),
            NoticeModality::Indemnified,
            &rules(),
            2,
        );

        assert_eq!(result.notice_days, 42);
        assert_eq!(result.indemnified_days, 42);
        assert_eq!(result.notice_pay, dec("4200"));
        assert_eq!(result.projected_date, date(2025, 1, 21));
    }

    #[test]
    fn test_long_tenure_caps_at_ninety_days() {
        let result = calculate_notice(
            dec("3000"),
            date(1990, 1, 1),
            date(2025, 1, 1),
            NoticeModality::Indemnified,
            &rules(),
            2,
        );

        assert_eq!(result.notice_days, 90);
        assert_eq!(result.notice_pay, dec("9000"));
    }

    #[test]
    fn test_audit_step() {
        let result = calculate_notice(
            dec("3000"),
            date(2023, 1, 1),
            date(2025, 3, 15),
            NoticeModality::Worked,
            &rules(),
            2,
        );

        assert_eq!(result.audit_step.rule_id, "notice_period");
        assert_eq!(result.audit_step.legal_ref, NOTICE_LEGAL_REF);
        assert_eq!(result.audit_step.input["modality"], "worked");
        assert_eq!(result.audit_step.output["notice_days"], 36);
        assert_eq!(result.audit_step.output["projected_date"], "2025-03-21");
    }
}
