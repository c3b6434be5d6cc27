use std::env;

use tracing_subscriber::EnvFilter;

use crate::registry::DEFAULT_NAMESPACE;

/// Runtime configuration for the `netopt` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Namespace used by requests that do not name one.
    pub namespace: String,
    /// `tracing` filter directive, e.g. `info` or `netopt_core=debug`.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Read `NETOPT_NAMESPACE` and `NETOPT_LOG` (falling back to `RUST_LOG`).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            namespace: env::var("NETOPT_NAMESPACE")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.namespace),
            log_filter: env::var("NETOPT_LOG")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_filter),
        }
    }

    /// Apply command-line overrides. Unknown flags are returned so the
    /// caller can report them.
    pub fn apply_args<I>(mut self, args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--namespace" | "-n" => {
                    self.namespace = args
                        .next()
                        .filter(|s| !s.is_empty())
                        .ok_or_else(|| format!("{} requires a value", arg))?;
                }
                "--log" => {
                    self.log_filter = args
                        .next()
                        .ok_or_else(|| format!("{} requires a value", arg))?;
                }
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(self)
    }
}

/// Install a `fmt` subscriber on stderr. Stdout is reserved for responses.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_args_override() {
        let cfg = EngineConfig::default()
            .apply_args(args(&["--namespace", "lab", "--log", "debug"]))
            .unwrap();
        assert_eq!(cfg.namespace, "lab");
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_args_errors() {
        assert!(EngineConfig::default().apply_args(args(&["--namespace"])).is_err());
        assert!(EngineConfig::default().apply_args(args(&["--bogus"])).is_err());
        assert_eq!(
            EngineConfig::default().apply_args(Vec::new()).unwrap(),
            EngineConfig::default()
        );
    }
}
