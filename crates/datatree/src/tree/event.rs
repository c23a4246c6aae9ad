//! Change notification for tree nodes
//!
//! Every structural or value mutation builds one [`TreeEvent`] and hands it,
//! synchronously and on the calling thread, to each listener registered on
//! the node concerned. Listeners are registered per node; they are not
//! inherited by children.
//!
//! Listener order is unspecified. The listener set is snapshotted before
//! each dispatch, so a listener may freely add or remove listeners (on any
//! node, including the one dispatching) without disturbing the delivery in
//! progress.
//!
//! A listener returning an error stops the dispatch and the error surfaces
//! from the mutating call as [`TreeError::Listener`](crate::TreeError). The
//! mutation itself has already happened at that point.

use std::rc::Rc;

use derive_more::Display;

use crate::tree::{ChildStore, Node};

/// What happened to the affected node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TreeEventKind {
    /// A child was attached to the source node
    #[display(fmt = "ChildAdded")]
    ChildAdded,
    /// A child was detached from the source node
    #[display(fmt = "ChildRemoved")]
    ChildRemoved,
    /// The value of the source node was replaced
    #[display(fmt = "ValueChanged")]
    ValueChanged,
    /// The source node was attached to a parent
    #[display(fmt = "AddedToTree")]
    AddedToTree,
    /// The source node was detached from its parent
    #[display(fmt = "RemovedFromTree")]
    RemovedFromTree,
}

/// A single change notification
///
/// Built inside the mutation that caused it and not retained afterwards.
pub struct TreeEvent<S: ChildStore> {
    kind: TreeEventKind,
    source: Node<S>,
    node: Node<S>,
    parent: Option<Node<S>>,
    index: usize,
    previous_value: Option<S::Value>,
}

impl<S: ChildStore> TreeEvent<S> {
    pub(crate) fn new(
        kind: TreeEventKind,
        source: Node<S>,
        node: Node<S>,
        parent: Option<Node<S>>,
        index: usize,
    ) -> Self {
        Self {
            kind,
            source,
            node,
            parent,
            index,
            previous_value: None,
        }
    }

    pub(crate) fn with_previous_value(mut self, value: S::Value) -> Self {
        self.previous_value = Some(value);
        self
    }

    /// The kind of change
    pub fn kind(&self) -> TreeEventKind {
        self.kind
    }

    /// The node on which the mutating call was made (or, for
    /// `AddedToTree`/`RemovedFromTree`, the node that moved)
    pub fn source(&self) -> &Node<S> {
        &self.source
    }

    /// The node that was added, removed or changed
    pub fn node(&self) -> &Node<S> {
        &self.node
    }

    /// The affected node's parent when the event fired
    ///
    /// For removals this is the former parent.
    pub fn parent(&self) -> Option<&Node<S>> {
        self.parent.as_ref()
    }

    /// The affected node's index among its siblings when the event fired
    ///
    /// For removals this is the former index; for roots it is 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The value before a `ValueChanged`; `None` for every other kind
    pub fn previous_value(&self) -> Option<&S::Value> {
        self.previous_value.as_ref()
    }
}

/// Receives change notifications from the nodes it is registered on
///
/// Every callback defaults to [`on_event`](TreeListener::on_event), so a
/// listener interested in all kinds only implements that one method.
pub trait TreeListener<S: ChildStore> {
    /// Catch-all callback used by the default implementations
    fn on_event(&self, _event: &TreeEvent<S>) -> anyhow::Result<()> {
        Ok(())
    }

    /// A child was attached to the node this listener is registered on
    fn child_added(&self, event: &TreeEvent<S>) -> anyhow::Result<()> {
        self.on_event(event)
    }

    /// A child was detached from the node this listener is registered on
    fn child_removed(&self, event: &TreeEvent<S>) -> anyhow::Result<()> {
        self.on_event(event)
    }

    /// The value of the node this listener is registered on changed
    fn value_changed(&self, event: &TreeEvent<S>) -> anyhow::Result<()> {
        self.on_event(event)
    }

    /// The node this listener is registered on was attached to a parent
    fn added_to_tree(&self, event: &TreeEvent<S>) -> anyhow::Result<()> {
        self.on_event(event)
    }

    /// The node this listener is registered on was detached from its parent
    fn removed_from_tree(&self, event: &TreeEvent<S>) -> anyhow::Result<()> {
        self.on_event(event)
    }
}

/// Closures receive every event kind
impl<S, F> TreeListener<S> for F
where
    S: ChildStore,
    F: Fn(&TreeEvent<S>) -> anyhow::Result<()>,
{
    fn on_event(&self, event: &TreeEvent<S>) -> anyhow::Result<()> {
        self(event)
    }
}

/// A listener as stored by a node
pub type SharedListener<S> = Rc<dyn TreeListener<S>>;

/// Route an event to the callback matching its kind
pub(crate) fn deliver<S: ChildStore>(
    listener: &dyn TreeListener<S>,
    event: &TreeEvent<S>,
) -> anyhow::Result<()> {
    match event.kind {
        TreeEventKind::ChildAdded => listener.child_added(event),
        TreeEventKind::ChildRemoved => listener.child_removed(event),
        TreeEventKind::ValueChanged => listener.value_changed(event),
        TreeEventKind::AddedToTree => listener.added_to_tree(event),
        TreeEventKind::RemovedFromTree => listener.removed_from_tree(event),
    }
}
