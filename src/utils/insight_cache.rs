use anyhow::Result;
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::time::Duration;

use crate::config::Config;
use crate::store::HrStore;

const DEFAULT_TTL_SECS: u64 = 300;

/// state fingerprint => generated insight text
pub static INSIGHT_CACHE: Lazy<Cache<String, String>> = Lazy::new(|| {
    let ttl = std::env::var("INSIGHT_CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TTL_SECS);
    Cache::builder()
        .max_capacity(256)
        .time_to_live(Duration::from_secs(ttl))
        .build()
});

/// Cheap state fingerprint: record counts only. An edit that keeps every
/// count unchanged can serve a stale insight until the TTL expires.
pub fn fingerprint(employees: usize, attendance: usize, payroll: usize) -> String {
    format!("{employees}:{attendance}:{payroll}")
}

pub async fn cached(key: &str) -> Option<String> {
    INSIGHT_CACHE.get(key).await
}

pub async fn remember(key: String, insight: String) {
    INSIGHT_CACHE.insert(key, insight).await;
}

/// Primes the cache with one insight for the current state so the first
/// dashboard request after startup is served warm. Effectively a no-op when
/// the upstream is unconfigured: the fallback string is never cached.
pub async fn warmup_insight_cache(store: &HrStore, config: &Config) -> Result<()> {
    let (employees, attendance, payroll) = {
        let state = store.read()?;
        (
            state.employees.clone(),
            state.attendance.clone(),
            state.payroll.clone(),
        )
    };
    crate::insight::generate(config, &employees, &attendance, &payroll).await;

    log::info!(
        "Insight cache warmup complete: fingerprinted {} employees, {} attendance, {} payroll records",
        employees.len(),
        attendance.len(),
        payroll.len()
    );
    Ok(())
}
