//! In-memory DOM for exercising locators and page objects without a browser.
//!
//! Nodes are registered against the exact [`By`] that should find them. A
//! node can start hidden, or appear only after a number of lookups, which is
//! enough to model pages whose bindings update after a network round-trip.

use crate::driver::{By, DomElement, DomSession, DriverFault};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle to a node registered in a [`MockDom`]
pub type NodeId = usize;

/// A fake DOM node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockNode {
    /// Rendered text
    pub text: String,
    /// Input value
    pub value: String,
    /// Whether the node is displayed
    pub visible: bool,
    /// Number of lookups that must happen before the node exists
    pub appears_after: u32,
    /// Click count
    pub clicks: u32,
    /// Enter key presses
    pub enter_presses: u32,
    /// Detached from the document
    pub removed: bool,
}

impl Default for MockNode {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: String::new(),
            visible: true,
            appears_after: 0,
            clicks: 0,
            enter_presses: 0,
            removed: false,
        }
    }
}

impl MockNode {
    /// Create a visible, empty node
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendered text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the input value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Start hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Only exist after `lookups` calls to `find_elements`
    #[must_use]
    pub const fn appearing_after(mut self, lookups: u32) -> Self {
        self.appears_after = lookups;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    nodes: Vec<MockNode>,
    index: Vec<(By, NodeId)>,
    faults: VecDeque<DriverFault>,
    lookups: u32,
    url: Option<String>,
    refreshes: u32,
    history: Vec<String>,
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory [`DomSession`]
#[derive(Debug, Clone, Default)]
pub struct MockDom {
    state: Arc<Mutex<MockState>>,
}

impl MockDom {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` as a match for `by`; insertion order is document order
    pub fn insert(&self, by: By, node: MockNode) -> NodeId {
        let mut state = lock(&self.state);
        let id = state.nodes.len();
        state.nodes.push(node);
        state.index.push((by, id));
        id
    }

    /// Make the next lookup fail with `fault`
    pub fn fail_next(&self, fault: DriverFault) {
        lock(&self.state).faults.push_back(fault);
    }

    /// Snapshot of a node
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<MockNode> {
        lock(&self.state).nodes.get(id).cloned()
    }

    /// Show or hide a node
    pub fn set_visible(&self, id: NodeId, visible: bool) {
        if let Some(node) = lock(&self.state).nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    /// Detach a node; existing handles to it become stale
    pub fn remove(&self, id: NodeId) {
        if let Some(node) = lock(&self.state).nodes.get_mut(id) {
            node.removed = true;
        }
    }

    /// Number of `find_elements` calls so far
    #[must_use]
    pub fn lookups(&self) -> u32 {
        lock(&self.state).lookups
    }

    /// Last URL navigated to
    #[must_use]
    pub fn current_url(&self) -> Option<String> {
        lock(&self.state).url.clone()
    }

    /// Number of reloads
    #[must_use]
    pub fn refreshes(&self) -> u32 {
        lock(&self.state).refreshes
    }

    /// Interaction log (`click:<text>`, `type:<text>`, ...)
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        lock(&self.state).history.clone()
    }
}

#[async_trait]
impl DomSession for MockDom {
    type Element = MockElement;

    async fn find_elements(&self, by: &By) -> Result<Vec<MockElement>, DriverFault> {
        let mut state = lock(&self.state);
        state.lookups += 1;
        if let Some(fault) = state.faults.pop_front() {
            return Err(fault);
        }
        let lookups = state.lookups;
        let found = state
            .index
            .iter()
            .filter(|(key, _)| key == by)
            .map(|(_, id)| *id)
            .filter(|id| {
                let node = &state.nodes[*id];
                !node.removed && lookups > node.appears_after
            })
            .map(|id| MockElement {
                state: Arc::clone(&self.state),
                id,
            })
            .collect();
        Ok(found)
    }

    async fn goto(&self, url: &str) -> Result<(), DriverFault> {
        let mut state = lock(&self.state);
        state.url = Some(url.to_string());
        state.history.push(format!("goto:{url}"));
        Ok(())
    }

    async fn refresh(&self) -> Result<(), DriverFault> {
        let mut state = lock(&self.state);
        state.refreshes += 1;
        state.history.push("refresh".to_string());
        Ok(())
    }
}

/// Handle to a node in a [`MockDom`]
#[derive(Debug, Clone)]
pub struct MockElement {
    state: Arc<Mutex<MockState>>,
    id: NodeId,
}

impl MockElement {
    /// Node id this handle points at
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    fn with_node<T>(&self, f: impl FnOnce(&mut MockNode, &mut Vec<String>) -> T) -> Result<T, DriverFault> {
        let mut guard = lock(&self.state);
        let state = &mut *guard;
        match state.nodes.get_mut(self.id) {
            Some(node) if !node.removed => Ok(f(node, &mut state.history)),
            _ => Err(DriverFault::Stale {
                message: format!("node {} is no longer attached", self.id),
            }),
        }
    }
}

#[async_trait]
impl DomElement for MockElement {
    async fn is_displayed(&self) -> Result<bool, DriverFault> {
        self.with_node(|node, _| node.visible)
    }

    async fn click(&self) -> Result<(), DriverFault> {
        self.with_node(|node, history| {
            node.clicks += 1;
            history.push(format!("click:{}", node.text));
        })
    }

    async fn clear(&self) -> Result<(), DriverFault> {
        self.with_node(|node, _| node.value.clear())
    }

    async fn send_keys(&self, text: &str) -> Result<(), DriverFault> {
        self.with_node(|node, history| {
            node.value.push_str(text);
            history.push(format!("type:{text}"));
        })
    }

    async fn press_enter(&self) -> Result<(), DriverFault> {
        self.with_node(|node, history| {
            node.enter_presses += 1;
            history.push("enter".to_string());
        })
    }

    async fn text(&self) -> Result<String, DriverFault> {
        self.with_node(|node, _| node.text.clone())
    }
}
