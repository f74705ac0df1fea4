// Configuration for the streaming TTS client

use std::time::Duration;

use tts_client::DEFAULT_ENDPOINT;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Unset means the call may wait on the server indefinitely.
    pub deadline_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            deadline_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup("TTS_ENDPOINT")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let deadline_secs = lookup("TTS_DEADLINE_SECS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&secs: &u64| secs > 0);

        let connect_timeout_secs = lookup("TTS_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&secs: &u64| secs > 0);

        Self {
            endpoint,
            deadline_secs,
            connect_timeout_secs,
        }
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(mut self, endpoint: Option<String>, deadline_secs: Option<u64>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if deadline_secs.is_some() {
            self.deadline_secs = deadline_secs;
        }
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_fixed_endpoint() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.deadline(), None);
        assert_eq!(config.connect_timeout(), None);
    }

    #[test]
    fn test_reads_environment() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("TTS_ENDPOINT", "http://localhost:8080/v1/tts"),
            ("TTS_DEADLINE_SECS", "30"),
            ("TTS_CONNECT_TIMEOUT_SECS", " 5 "),
        ]));
        assert_eq!(config.endpoint, "http://localhost:8080/v1/tts");
        assert_eq!(config.deadline(), Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("TTS_ENDPOINT", "   "),
            ("TTS_DEADLINE_SECS", "soon"),
            ("TTS_CONNECT_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let config = ClientConfig::from_lookup(lookup_from(&[("TTS_DEADLINE_SECS", "30")]))
            .with_overrides(Some("http://127.0.0.1:9000/v1/tts".to_string()), Some(3));
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/v1/tts");
        assert_eq!(config.deadline_secs, Some(3));

        let config = ClientConfig::from_lookup(lookup_from(&[("TTS_DEADLINE_SECS", "30")]))
            .with_overrides(None, None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.deadline_secs, Some(30));
    }
}
