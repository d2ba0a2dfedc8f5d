// Small dev utility: preview a date change without committing it.
//
// Usage:
//   cargo run --bin date_change_preview -- <scenario.json> [config_db_path]
//
// Prints the entry gate, the recomputed selection and the payment impact as JSON.
// Policy values come from config_kv (explicit path, or the default config db if it
// exists), defaults otherwise.

use chrono::{Local, NaiveDate, NaiveTime};
use reservation_date_change::config::{ConfigManager, DateChangePolicyConfig};
use reservation_date_change::db::default_config_db_path;
use reservation_date_change::domain::{PaymentPlan, Reservation, Season, SelectedDateData};
use reservation_date_change::engine::{
    DateValidationError, DeadlinePolicyEvaluator, EntryGate, ImpactInput, PaymentImpact,
    PaymentImpactClassifier, SeasonPriceCalculator,
};
use reservation_date_change::{i18n, logging};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    reservation: Reservation,
    payment_plan: PaymentPlan,
    season: Season,
    new_date: NaiveDate,
    /// 缺省为本地当天
    #[serde(default)]
    today: Option<NaiveDate>,
    #[serde(default)]
    locale: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewReport {
    gate: EntryGate,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection: Option<SelectedDateData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_error: Option<DateValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    impact: Option<PaymentImpact>,
}

/// 显式路径优先；否则仅在默认配置库已存在时读取
fn load_policy(db_path: Option<String>) -> Result<DateChangePolicyConfig, Box<dyn std::error::Error>> {
    let path = match db_path {
        Some(path) => path,
        None => {
            let path = default_config_db_path();
            if !std::path::Path::new(&path).exists() {
                return Ok(DateChangePolicyConfig::default());
            }
            path
        }
    };
    ConfigManager::new(&path)?.load_policy()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let scenario_path = args
        .next()
        .ok_or("usage: date_change_preview <scenario.json> [config_db_path]")?;
    let policy = load_policy(args.next())?;

    let raw = std::fs::read_to_string(&scenario_path)?;
    let scenario: Scenario = serde_json::from_str(&raw)?;
    if let Some(locale) = scenario.locale.as_deref() {
        i18n::set_locale(locale);
    }

    let today = scenario.today.unwrap_or_else(|| Local::now().date_naive());
    let gate = DeadlinePolicyEvaluator::new().entry_gate(
        &scenario.payment_plan,
        scenario.reservation.travel_date,
        today.and_time(NaiveTime::MIN),
    );

    let mut report = PreviewReport {
        gate,
        selection: None,
        validation_error: None,
        validation_message: None,
        impact: None,
    };

    if gate.is_permitted() {
        let calculator = SeasonPriceCalculator::with_policy(&policy);
        match calculator.calculate(
            &scenario.season,
            &scenario.reservation.party,
            scenario.new_date,
            today,
        ) {
            Ok(selection) => {
                let classifier = PaymentImpactClassifier::with_policy(policy);
                report.impact = Some(classifier.classify(&ImpactInput {
                    current_total: scenario.reservation.total_price,
                    new_total: selection.new_total_price,
                    plan_type: scenario.payment_plan.plan_type,
                    installments: &scenario.payment_plan.installments,
                    currency: &scenario.reservation.currency,
                }));
                report.selection = Some(selection);
            }
            Err(e) => {
                tracing::warn!(error = %e, "新日期校验未通过");
                report.validation_message = Some(e.message());
                report.validation_error = Some(e);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
