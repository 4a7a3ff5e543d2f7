use std::sync::Arc;

use crate::client::{StatsClient, DEFAULT_RATE};
use crate::tags;

use super::{swallow, Gauge};

/// Gauge reporting an absolute value on every update. Holds no prior value.
#[derive(Clone)]
pub struct StatsdGauge {
    name: String,
    client: Arc<dyn StatsClient>,
    tags: Vec<String>,
}

impl StatsdGauge {
    /// # Panics
    /// If `name` is empty.
    pub fn new(name: &str, client: Arc<dyn StatsClient>) -> Self {
        assert!(!name.is_empty(), "gauge name cannot be empty");
        Self {
            name: name.to_string(),
            client,
            tags: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Gauge for StatsdGauge {
    fn update(&self, value: i64) {
        swallow(
            "gauge",
            &self.name,
            self.client
                .gauge(&self.name, value as f64, &self.tags, DEFAULT_RATE),
        );
    }

    fn with_tags(&self, extra: &[String]) -> Box<dyn Gauge> {
        Box::new(Self {
            name: self.name.clone(),
            client: Arc::clone(&self.client),
            tags: tags::append(&self.tags, extra),
        })
    }

    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Gauge> {
        self.with_tags(&[tags::tag(key, value)])
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}
