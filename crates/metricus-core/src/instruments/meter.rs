use super::{Counter, Meter};

/// [`Meter`] backed by a [`Counter`] of the same name. `mark` is `inc`.
pub struct CounterMeter {
    counter: Box<dyn Counter>,
}

impl CounterMeter {
    pub fn new(counter: Box<dyn Counter>) -> Self {
        Self { counter }
    }
}

impl Meter for CounterMeter {
    fn mark(&self, value: i64) {
        self.counter.inc(value);
    }

    fn with_tags(&self, tags: &[String]) -> Box<dyn Meter> {
        Box::new(Self::new(self.counter.with_tags(tags)))
    }

    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Meter> {
        self.with_tags(&[crate::tags::tag(key, value)])
    }

    fn tags(&self) -> &[String] {
        self.counter.tags()
    }
}
