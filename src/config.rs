use crate::analysis::{Analyzer, PerFieldAnalyzer, analyzer_by_name};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Query parser configuration, loadable from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Field searched when a clause has no `field:` prefix
    #[serde(default = "default_field")]
    pub default_field: String,

    /// Permit terms that begin with `*` or `?`. Off by default: leading
    /// wildcards force a scan over the whole term dictionary.
    #[serde(default)]
    pub allow_leading_wildcard: bool,

    /// Named analyzer applied to fields without an override
    /// (standard, simple, whitespace, keyword)
    #[serde(default = "default_analyzer")]
    pub analyzer: String,

    /// Per-field analyzer overrides, field name to analyzer name
    #[serde(default)]
    pub field_analyzers: FxHashMap<String, String>,

    /// Stopwords added on top of the built-in English list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

fn default_field() -> String {
    "body".to_string()
}

fn default_analyzer() -> String {
    "standard".to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_field: default_field(),
            allow_leading_wildcard: false,
            analyzer: default_analyzer(),
            field_analyzers: FxHashMap::default(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&data)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Assemble the per-field analyzer described by this configuration.
    pub fn build_analyzer(&self) -> Result<Arc<dyn Analyzer>> {
        let default = analyzer_by_name(&self.analyzer, &self.extra_stopwords)
            .with_context(|| format!("unknown analyzer: {}", self.analyzer))?;
        let mut per_field = PerFieldAnalyzer::new(Arc::new(default));
        for (field, name) in &self.field_analyzers {
            let analyzer = analyzer_by_name(name, &self.extra_stopwords)
                .with_context(|| format!("unknown analyzer for field {field}: {name}"))?;
            per_field = per_field.with_field(field.clone(), Arc::new(analyzer));
        }
        Ok(Arc::new(per_field))
    }
}
