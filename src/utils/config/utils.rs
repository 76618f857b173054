use std::env;

/// Environment variable helpers used by configuration loading
pub struct ConfigUtils;

impl ConfigUtils {
    pub fn get_env_var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }

    pub fn get_env_var_with_default(key: &str, default_value: &str) -> String {
        Self::get_env_var(key).unwrap_or_else(|| default_value.to_string())
    }

    /// Load a `.env` file if one exists; a missing file is not an error
    pub fn load_dotenv() -> bool {
        dotenvy::dotenv().is_ok()
    }

    pub fn get_bool_config(key: &str, default: bool) -> bool {
        if let Ok(value) = env::var(key) {
            match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => default,
            }
        } else {
            default
        }
    }

    pub fn get_numeric_config<T>(key: &str, default: T) -> T
    where
        T: std::str::FromStr + Clone,
    {
        if let Ok(value) = env::var(key) {
            value.trim().parse().unwrap_or(default)
        } else {
            default
        }
    }
}
