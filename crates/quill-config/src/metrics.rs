use std::env;

#[derive(Clone, Debug)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    pub fn from_env() -> Self {
        Self::from_source(&|key: &str| env::var(key).ok())
    }

    /// `METRICS_ENABLED=false` or `0` turns metrics off; anything else leaves them on.
    pub fn from_source<F>(get: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = get("METRICS_ENABLED")
            .map(|v| {
                let v = v.trim();
                !v.eq_ignore_ascii_case("false") && v != "0"
            })
            .unwrap_or(true);

        Self { enabled }
    }
}
