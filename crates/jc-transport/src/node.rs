//! Topic bus and node handles.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::error::TransportResult;
use crate::msgs::Double;
use crate::topic::normalize_topic;

type Callback = Arc<dyn Fn(&Double) + Send + Sync>;

#[derive(Default)]
struct Bus {
    topics: RwLock<HashMap<String, Vec<Callback>>>,
}

/// Handle onto a shared bus.
///
/// Cloning a `Node` shares the bus, so a subscriber registered through one
/// clone receives messages published through any other.
#[derive(Clone, Default)]
pub struct Node {
    bus: Arc<Bus>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("topics", &self.bus.topics.read().len())
            .finish()
    }
}

impl Node {
    /// Create a node on a fresh bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every message published on `topic`.
    ///
    /// Returns the normalized topic name.
    pub fn subscribe<F>(&self, topic: &str, callback: F) -> TransportResult<String>
    where
        F: Fn(&Double) + Send + Sync + 'static,
    {
        let topic = normalize_topic(topic)?;
        self.bus
            .topics
            .write()
            .entry(topic.clone())
            .or_default()
            .push(Arc::new(callback));
        Ok(topic)
    }

    /// Create a publisher bound to `topic`.
    pub fn advertise(&self, topic: &str) -> TransportResult<Publisher> {
        let topic = normalize_topic(topic)?;
        Ok(Publisher {
            node: self.clone(),
            topic,
        })
    }

    /// Deliver `msg` to every subscriber of `topic` on the calling thread.
    ///
    /// Returns the number of callbacks invoked. The bus lock is released
    /// before any callback runs.
    pub fn publish(&self, topic: &str, msg: &Double) -> TransportResult<usize> {
        let topic = normalize_topic(topic)?;
        Ok(self.deliver(&topic, msg))
    }

    /// Topics with at least one subscriber.
    pub fn subscribed_topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.bus.topics.read().keys().cloned().collect();
        topics.sort();
        topics
    }

    fn deliver(&self, topic: &str, msg: &Double) -> usize {
        let callbacks: Vec<Callback> = match self.bus.topics.read().get(topic) {
            Some(subs) => subs.clone(),
            None => return 0,
        };
        trace!(topic, data = msg.data, subscribers = callbacks.len(), "deliver");
        for callback in &callbacks {
            callback(msg);
        }
        callbacks.len()
    }
}

/// Publisher bound to one topic.
#[derive(Clone, Debug)]
pub struct Publisher {
    node: Node,
    topic: String,
}

impl Publisher {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Publish `msg`, returning the number of subscribers reached.
    pub fn publish(&self, msg: &Double) -> usize {
        self.node.deliver(&self.topic, msg)
    }
}
