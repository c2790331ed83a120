use crate::domain::model::Delivery;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventMessage {
    pub name: String,
    pub data: serde_json::Value,
}

impl EventMessage {
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Handlers never fail the event; they report a [`Delivery`] instead.
#[async_trait]
pub trait Subscriber: Send + Sync {
    fn name(&self) -> &str;
    fn events(&self) -> &[&'static str];
    async fn handle(&self, event: &EventMessage) -> Delivery;
}

/// In-process dispatcher. Outcomes are logged and otherwise ignored.
#[derive(Default, Clone)]
pub struct EventBus {
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) {
        tracing::debug!(
            "Subscribing {} to {:?}",
            subscriber.name(),
            subscriber.events()
        );
        self.subscribers.push(subscriber);
    }

    /// Returns how many subscribers were invoked.
    pub async fn emit(&self, event: &EventMessage) -> usize {
        let mut invoked = 0;
        for subscriber in self
            .subscribers
            .iter()
            .filter(|s| s.events().contains(&event.name.as_str()))
        {
            invoked += 1;
            match subscriber.handle(event).await {
                Delivery::Sent { to } => {
                    tracing::debug!("{} handled {} for {}", subscriber.name(), event.name, to)
                }
                Delivery::Dropped { reason } => tracing::debug!(
                    "{} dropped {}: {}",
                    subscriber.name(),
                    event.name,
                    reason
                ),
            }
        }

        if invoked == 0 {
            tracing::debug!("No subscribers for {}", event.name);
        }
        invoked
    }
}
