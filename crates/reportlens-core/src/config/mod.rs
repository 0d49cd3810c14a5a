use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config root must be a JSON object")]
    NotAnObject,
}

/// JSON-backed settings with dotted-path access (`layout.defaultScale`, `usage.topN`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct LensConfig(Value);

impl Default for LensConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl LensConfig {
    /// Built-in settings. The scale values mirror the comparison page's slider.
    pub fn defaults() -> Self {
        Self(json!({
            "layout": {
                "defaultScale": 0.48,
                "minScale": 0.1,
                "maxScale": 10.0,
                "scaleStep": 0.01
            },
            "usage": {
                "topN": 5
            },
            "theme": {
                "primary": "#7c4dff"
            },
            "render": {
                "paneGap": 32.0,
                "viewboxPadding": 8.0
            }
        }))
    }

    /// Parses user overrides and merges them onto [`LensConfig::defaults`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(text)?;
        if !overrides.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        let mut config = Self::defaults();
        config.deep_merge(&overrides);
        Ok(config)
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.lookup(dotted_path)?.as_f64().filter(|v| v.is_finite())
    }

    pub fn get_usize(&self, dotted_path: &str) -> Option<usize> {
        self.lookup(dotted_path)?
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    pub fn top_n(&self) -> usize {
        self.get_usize("usage.topN")
            .unwrap_or(crate::usage::DEFAULT_TOP_N)
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
