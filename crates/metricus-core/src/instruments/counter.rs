use std::sync::Arc;

use crate::client::{StatsClient, DEFAULT_RATE};
use crate::tags;

use super::{swallow, Counter};

/// Counter emitting `count` measurements.
#[derive(Clone)]
pub struct StatsdCounter {
    name: String,
    client: Arc<dyn StatsClient>,
    tags: Vec<String>,
}

impl StatsdCounter {
    /// # Panics
    /// If `name` is empty.
    pub fn new(name: &str, client: Arc<dyn StatsClient>) -> Self {
        assert!(!name.is_empty(), "counter name cannot be empty");
        Self {
            name: name.to_string(),
            client,
            tags: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn derive(&self, extra: &[String]) -> Self {
        Self {
            name: self.name.clone(),
            client: Arc::clone(&self.client),
            tags: tags::append(&self.tags, extra),
        }
    }

    fn emit(&self, delta: i64) {
        swallow(
            "counter",
            &self.name,
            self.client.count(&self.name, delta, &self.tags, DEFAULT_RATE),
        );
    }
}

impl Counter for StatsdCounter {
    fn inc(&self, delta: i64) {
        self.emit(delta);
    }

    fn dec(&self, delta: i64) {
        self.emit(delta.wrapping_neg());
    }

    fn with_tags(&self, tags: &[String]) -> Box<dyn Counter> {
        Box::new(self.derive(tags))
    }

    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Counter> {
        self.with_tags(&[tags::tag(key, value)])
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}
