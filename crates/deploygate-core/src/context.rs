//! Result publishing for later build steps

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

/// Fixed keys under which upload results are published
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputKey {
    /// URL of the newly uploaded build
    DistributionUrl,
    /// Auto incremented revision number
    Revision,
    /// Raw `results` document returned by the service
    AppInfo,
}

impl OutputKey {
    pub const ALL: [OutputKey; 3] = [Self::DistributionUrl, Self::Revision, Self::AppInfo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DistributionUrl => "DISTRIBUTION_URL",
            Self::Revision => "REVISION",
            Self::AppInfo => "APP_INFO",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DistributionUrl => "URL of the newly uploaded build",
            Self::Revision => "Auto incremented revision number",
            Self::AppInfo => "Contains app revision, bundle identifier, etc.",
        }
    }
}

impl std::fmt::Display for OutputKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sink for published results
pub trait ResultPublisher {
    fn publish(&mut self, key: OutputKey, value: Value);
}

/// In-memory result store handed to the uploader by its caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneContext {
    values: BTreeMap<OutputKey, Value>,
}

impl LaneContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: OutputKey) -> Option<&Value> {
        self.values.get(&key)
    }

    pub fn get_str(&self, key: OutputKey) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: OutputKey) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// All published values as one JSON object
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }

    /// `KEY=value` lines: strings unquoted, everything else as compact JSON
    pub fn to_env_lines(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{}={}", key, s),
                other => format!("{}={}", key, other),
            })
            .collect()
    }

    /// Append published values to `path` in `KEY=value` form
    ///
    /// The format matches CI step-output files such as `$GITHUB_OUTPUT`.
    pub fn write_env_file(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        for line in self.to_env_lines() {
            writeln!(file, "{}", line)?;
        }
        debug!(path = %path.display(), count = self.len(), "wrote outputs");
        Ok(())
    }
}

impl ResultPublisher for LaneContext {
    fn publish(&mut self, key: OutputKey, value: Value) {
        debug!(key = %key, "publishing output");
        self.values.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn published() -> LaneContext {
        let mut context = LaneContext::new();
        context.publish(
            OutputKey::DistributionUrl,
            json!("https://deploygate.com/users/alice/platforms/android/apps/com.example"),
        );
        context.publish(OutputKey::Revision, json!(7));
        context.publish(
            OutputKey::AppInfo,
            json!({"revision": 7, "package_name": "com.example"}),
        );
        context
    }

    #[test]
    fn test_empty_context() {
        let context = LaneContext::new();
        assert!(context.is_empty());
        assert!(context.get(OutputKey::Revision).is_none());
        assert_eq!(context.to_json(), json!({}));
    }

    #[test]
    fn test_typed_getters() {
        let context = published();
        assert_eq!(context.len(), 3);
        assert_eq!(context.get_i64(OutputKey::Revision), Some(7));
        assert!(context
            .get_str(OutputKey::DistributionUrl)
            .unwrap()
            .ends_with("com.example"));
        assert!(context.get_str(OutputKey::Revision).is_none());
    }

    #[test]
    fn test_env_lines() {
        let lines = published().to_env_lines();
        assert_eq!(
            lines,
            vec![
                "DISTRIBUTION_URL=https://deploygate.com/users/alice/platforms/android/apps/com.example"
                    .to_string(),
                "REVISION=7".to_string(),
                r#"APP_INFO={"package_name":"com.example","revision":7}"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_write_env_file_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("outputs");
        std::fs::write(&path, "EXISTING=1\n").unwrap();

        published().write_env_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("EXISTING=1\n"));
        assert!(content.contains("\nREVISION=7\n"));
    }
}
