//! Minimal behavior-tree primitives.
//!
//! Every tick completes immediately with [`Status::Success`] or
//! [`Status::Failure`]; there is no running state, which suits a turn-based
//! game where each decision is made in one pass.

/// Result of ticking a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn from_bool(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

/// A node evaluated against a blackboard `C`.
pub trait BehaviorNode<C>: Send + Sync {
    fn tick(&self, ctx: &mut C) -> Status;
}

pub type Node<C> = Box<dyn BehaviorNode<C>>;

impl<C> BehaviorNode<C> for Node<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

/// Short-circuiting AND over its children.
pub struct Sequence<C> {
    children: Vec<Node<C>>,
}

impl<C> BehaviorNode<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx) == Status::Failure {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Short-circuiting OR over its children.
pub struct Selector<C> {
    children: Vec<Node<C>>,
}

impl<C> BehaviorNode<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx) == Status::Success {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

/// Flips the child's status.
pub struct Inverter<C> {
    child: Node<C>,
}

impl<C> BehaviorNode<C> for Inverter<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

/// Read-only predicate over the blackboard.
pub struct Condition<C> {
    predicate: fn(&C) -> bool,
}

impl<C> BehaviorNode<C> for Condition<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

pub fn sequence<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Box::new(Sequence { children })
}

pub fn selector<C: 'static>(children: Vec<Node<C>>) -> Node<C> {
    Box::new(Selector { children })
}

pub fn inverter<C: 'static>(child: Node<C>) -> Node<C> {
    Box::new(Inverter { child })
}

pub fn condition<C: 'static>(predicate: fn(&C) -> bool) -> Node<C> {
    Box::new(Condition { predicate })
}
