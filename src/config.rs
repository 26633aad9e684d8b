use crate::models::CalculatorVariant;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_LEAD_INTAKE_URL: &str = "https://api.web3forms.com/submit";
pub const DEFAULT_LEAD_SUBJECT: &str = "New Demo Request from SHAED Website";
pub const DEFAULT_CONTACT_EMAIL: &str = "ryan.pritchard@shaed.ai";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub calculator_variant: CalculatorVariant,
    pub lead_intake_url: String,
    pub lead_access_key: Option<String>, // Without it every lead goes to the mail draft
    pub lead_subject: String,
    pub contact_email: String,
    pub lead_timeout_secs: u64,
    pub submit_cooldown_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calculator_variant: CalculatorVariant::Full,
            lead_intake_url: DEFAULT_LEAD_INTAKE_URL.to_string(),
            lead_access_key: None,
            lead_subject: DEFAULT_LEAD_SUBJECT.to_string(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            lead_timeout_secs: 8,
            submit_cooldown_secs: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            calculator_variant: std::env::var("CALCULATOR_VARIANT")
                .unwrap_or_else(|_| "full".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("CALCULATOR_VARIANT: {}", e))?,
            lead_intake_url: std::env::var("LEAD_INTAKE_URL")
                .or_else(|_| Ok::<_, anyhow::Error>(DEFAULT_LEAD_INTAKE_URL.to_string()))
                .and_then(|url| {
                    let url = url.trim().to_string();
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("LEAD_INTAKE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            lead_access_key: std::env::var("LEAD_ACCESS_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            lead_subject: std::env::var("LEAD_SUBJECT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LEAD_SUBJECT.to_string()),
            contact_email: std::env::var("CONTACT_EMAIL")
                .or_else(|_| Ok::<_, anyhow::Error>(DEFAULT_CONTACT_EMAIL.to_string()))
                .and_then(|email| {
                    if !crate::validation::is_valid_email(&email) {
                        anyhow::bail!("CONTACT_EMAIL must be a valid email address");
                    }
                    Ok(email)
                })?,
            lead_timeout_secs: std::env::var("LEAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("LEAD_TIMEOUT_SECS must be a whole number of seconds"))
                .and_then(|secs: u64| {
                    if secs == 0 {
                        anyhow::bail!("LEAD_TIMEOUT_SECS must be greater than zero");
                    }
                    Ok(secs)
                })?,
            submit_cooldown_secs: std::env::var("SUBMIT_COOLDOWN_SECS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .map_err(|_| {
                    anyhow::anyhow!("SUBMIT_COOLDOWN_SECS must be a whole number of seconds")
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Calculator variant: {:?}", config.calculator_variant);
        tracing::debug!("Lead intake URL: {}", config.lead_intake_url);
        if config.lead_access_key.is_none() {
            tracing::warn!("LEAD_ACCESS_KEY not set; leads will use the mail-draft fallback");
        }
        tracing::debug!(
            "Lead timeout: {}s, submit cool-down: {}s",
            config.lead_timeout_secs,
            config.submit_cooldown_secs
        );

        Ok(config)
    }

    pub fn lead_timeout(&self) -> Duration {
        Duration::from_secs(self.lead_timeout_secs)
    }

    pub fn submit_cooldown(&self) -> Duration {
        Duration::from_secs(self.submit_cooldown_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_behaviour() {
        let config = Config::default();
        assert_eq!(config.lead_timeout(), Duration::from_secs(8));
        assert_eq!(config.submit_cooldown(), Duration::from_secs(4));
        assert_eq!(config.calculator_variant, CalculatorVariant::Full);
        assert!(config.lead_access_key.is_none());
    }
}
