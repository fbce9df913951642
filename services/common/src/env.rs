use std::{env, str::FromStr};

/// Reads `key` from the environment and parses it as `T`.
///
/// Unset, empty and unparseable values all fall back to `default`.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key).unwrap_or(default)
}

/// Like [`env_or`] but without a default.
pub fn env_opt<T: FromStr>(key: &str) -> Option<T> {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_uses_default() {
        let port = env_or("RELAY_COMMON_TEST_UNSET_PORT", 7777u16);
        assert_eq!(port, 7777);
    }

    #[test]
    fn empty_value_uses_default() {
        env::set_var("RELAY_COMMON_TEST_EMPTY", "");
        let bucket = env_or("RELAY_COMMON_TEST_EMPTY", "mybucket".to_string());
        assert_eq!(bucket, "mybucket");
    }

    #[test]
    fn unparseable_value_uses_default() {
        env::set_var("RELAY_COMMON_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_or("RELAY_COMMON_TEST_BAD_PORT", 80u16), 80);
        assert_eq!(env_opt::<u16>("RELAY_COMMON_TEST_BAD_PORT"), None);
    }

    #[test]
    fn parses_typed_value() {
        env::set_var("RELAY_COMMON_TEST_TIMEOUT", "2500");
        assert_eq!(env_opt::<u64>("RELAY_COMMON_TEST_TIMEOUT"), Some(2500));
    }
}
