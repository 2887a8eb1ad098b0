use bevy::prelude::*;
use shared::{DEFAULT_ENDPOINT, IDLE_TIMEOUT, RECONNECT_DELAY};
use std::time::Duration;

/// Environment variable that overrides the simulator endpoint.
pub const ENDPOINT_ENV: &str = "TILTROTOR_VIZ_ENDPOINT";

/// Where the snapshot stream lives and how the link behaves when it drops.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub endpoint: String,
    pub reconnect_delay: Duration,
    /// Silence on an open connection longer than this drops it.
    pub idle_timeout: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reconnect_delay: RECONNECT_DELAY,
            idle_timeout: IDLE_TIMEOUT,
        }
    }
}

impl ViewerConfig {
    /// Defaults, with the endpoint optionally overridden from CLI args or the environment.
    pub fn from_cli_env() -> Self {
        let endpoint = endpoint_override(std::env::args().skip(1), std::env::var(ENDPOINT_ENV).ok());
        match endpoint {
            Some(endpoint) => Self {
                endpoint,
                ..default()
            },
            None => Self::default(),
        }
    }
}

/// Returns an endpoint from CLI args or environment if present.
///
/// Supported:
///   --endpoint <url> / -e <url>
///   --endpoint=<url>
///   TILTROTOR_VIZ_ENDPOINT environment variable
///
/// CLI wins over the environment. Empty values are ignored.
fn endpoint_override(
    args: impl IntoIterator<Item = String>,
    env_value: Option<String>,
) -> Option<String> {
    let mut args = args.into_iter();
    let mut from_cli = None;

    while let Some(arg) = args.next() {
        if arg == "--endpoint" || arg == "-e" {
            from_cli = args.next();
        } else if let Some(val) = arg.strip_prefix("--endpoint=") {
            from_cli = Some(val.to_string());
        }
    }

    from_cli
        .into_iter()
        .chain(env_value)
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_point_at_local_simulator() {
        let config = ViewerConfig::default();
        assert_eq!(config.endpoint, "ws://localhost:8765");
        assert_eq!(config.reconnect_delay, Duration::from_secs(1));
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
    }

    #[test]
    fn no_override_without_args_or_env() {
        assert_eq!(endpoint_override(args(&[]), None), None);
        assert_eq!(endpoint_override(args(&["--verbose"]), None), None);
    }

    #[test]
    fn cli_flag_forms() {
        assert_eq!(
            endpoint_override(args(&["--endpoint", "ws://10.0.0.2:9000"]), None),
            Some("ws://10.0.0.2:9000".to_string())
        );
        assert_eq!(
            endpoint_override(args(&["--endpoint=ws://sim:8765"]), None),
            Some("ws://sim:8765".to_string())
        );
        assert_eq!(
            endpoint_override(args(&["-e", "ws://a:1"]), None),
            Some("ws://a:1".to_string())
        );
    }

    #[test]
    fn cli_wins_over_env() {
        assert_eq!(
            endpoint_override(
                args(&["--endpoint", "ws://cli:1"]),
                Some("ws://env:2".to_string())
            ),
            Some("ws://cli:1".to_string())
        );
        assert_eq!(
            endpoint_override(args(&[]), Some("ws://env:2".to_string())),
            Some("ws://env:2".to_string())
        );
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(endpoint_override(args(&["--endpoint="]), None), None);
        assert_eq!(
            endpoint_override(args(&["--endpoint", "  "]), Some("ws://env:2".to_string())),
            Some("ws://env:2".to_string())
        );
        // Dangling flag with no value.
        assert_eq!(endpoint_override(args(&["--endpoint"]), None), None);
    }
}
