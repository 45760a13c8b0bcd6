use std::env;

use crate::parse_or;

/// bcrypt accepts work factors in this range.
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self::from_source(&|key: &str| env::var(key).ok())
    }

    pub fn from_source<F>(get: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_cost = Self::default().bcrypt_cost;
        let cost = parse_or(get, "BCRYPT_COST", default_cost);
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            tracing::warn!(cost, "BCRYPT_COST out of range, using {}", default_cost);
            return Self::default();
        }
        Self { bcrypt_cost: cost }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::source;

    #[test]
    fn test_out_of_range_cost_falls_back() {
        let config = PasswordConfig::from_source(&source(&[("BCRYPT_COST", "2")]));
        assert_eq!(config.bcrypt_cost, 10);
        let config = PasswordConfig::from_source(&source(&[("BCRYPT_COST", "12")]));
        assert_eq!(config.bcrypt_cost, 12);
    }
}
