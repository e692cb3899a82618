//! Server configuration parsed from environment variables.

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_APP_URL: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Origin allowed by CORS (the SPA's URL).
    pub app_url: String,
}

impl ServerConfig {
    /// - `PORT`: default 3001
    /// - `APP_URL`: default `http://localhost:5173`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            app_url: std::env::var("APP_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_reads_valid_value() {
        let key = "__TEST_PYTHOUGHTS_ENV_PARSE_OK__";
        unsafe { std::env::set_var(key, " 8080 ") };
        assert_eq!(env_parse::<u16>(key, 1), 8080);
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        let key = "__TEST_PYTHOUGHTS_ENV_PARSE_BAD__";
        unsafe { std::env::set_var(key, "eighty") };
        assert_eq!(env_parse::<u16>(key, 3001), 3001);
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn env_parse_unset_uses_default() {
        assert_eq!(env_parse::<usize>("__TEST_PYTHOUGHTS_SURELY_UNSET__", 20), 20);
    }
}
