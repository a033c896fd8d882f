use anyhow::{Result, anyhow};
use std::time::Duration;
use tracing::{instrument, warn};

use crate::config::Config;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::payroll::PayrollRecord;
use crate::utils::insight_cache;

/// Served whenever the text upstream is unconfigured, unreachable, over
/// quota or returns something unusable.
pub const FALLBACK_INSIGHT: &str =
    "Pakque AI is currently unreachable. Please check your system configuration.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Generates the strategic-advisor text for the given state, consulting the
/// TTL cache first. Failures degrade to [`FALLBACK_INSIGHT`] and are never
/// cached, so the next request retries the upstream. Ledger state is not
/// touched either way.
pub async fn generate(
    config: &Config,
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    payroll: &[PayrollRecord],
) -> String {
    let key = insight_cache::fingerprint(employees.len(), attendance.len(), payroll.len());
    if let Some(hit) = insight_cache::cached(&key).await {
        return hit;
    }

    match advise(config, employees, attendance, payroll).await {
        Ok(text) => {
            insight_cache::remember(key, text.clone()).await;
            text
        }
        Err(e) => {
            warn!(error = %e, "Insight upstream failed, serving fallback");
            FALLBACK_INSIGHT.to_string()
        }
    }
}

/// The advisor prompt: persona, serialized roster and ledgers, analysis ask.
fn build_prompt(
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    payroll: &[PayrollRecord],
) -> Result<String> {
    Ok(format!(
        "You are the Pakque Strategic AI Advisor, specialized in HR and Labour Relations.\n\
         Analyze the following data for our partner organization:\n\n\
         Employees: {}\n\
         Attendance: {}\n\
         Payroll: {}\n\n\
         Provide a deep dive into workforce efficiency, potential labour relations risks \
         (e.g. burn out, high turnover patterns), and strategic payroll optimizations.\n\
         Use a professional, authoritative, yet innovative tone that represents Pakque's \
         brand as an HR and Labour Relations Partner.",
        serde_json::to_string(employees)?,
        serde_json::to_string(attendance)?,
        serde_json::to_string(payroll)?,
    ))
}

#[instrument(skip_all)]
async fn advise(
    config: &Config,
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    payroll: &[PayrollRecord],
) -> Result<String> {
    let api_key = config
        .insight_api_key
        .as_deref()
        .ok_or_else(|| anyhow!("INSIGHT_API_KEY is not configured"))?;
    let prompt = build_prompt(employees, attendance, payroll)?;

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let body = serde_json::json!({
        "model": config.insight_model,
        "messages": [{ "role": "user", "content": prompt }],
    });
    let url = format!(
        "{}/chat/completions",
        config.insight_api_base.trim_end_matches('/')
    );

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;
    let payload: serde_json::Value = response.json().await?;

    let text = payload["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow!("completion response carried no text"))?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HrState;

    fn offline_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            data_dir: "data".to_string(),
            api_prefix: "/api/v1".to_string(),
            rate_api_per_min: 1000,
            insight_api_base: "https://api.openai.com/v1".to_string(),
            insight_api_key: None,
            insight_model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn prompt_carries_roster_and_analysis_ask() {
        let state = HrState::seeded();
        let prompt = build_prompt(&state.employees, &state.attendance, &state.payroll).unwrap();

        assert!(prompt.contains("Pakque Strategic AI Advisor"));
        assert!(prompt.contains("Sarah Jenkins"));
        assert!(prompt.contains("workforce efficiency"));
        assert!(prompt.contains("payroll optimizations"));
    }

    #[actix_web::test]
    async fn unconfigured_upstream_serves_the_fallback() {
        let state = HrState::seeded();
        // one employee gives this test its own cache fingerprint
        let employees = &state.employees[..1];

        let text = generate(&offline_config(), employees, &state.attendance, &state.payroll).await;
        assert_eq!(text, FALLBACK_INSIGHT);

        // fallbacks are not cached; the next request retries the upstream
        let key = insight_cache::fingerprint(1, 0, 0);
        assert!(insight_cache::cached(&key).await.is_none());
    }
}
