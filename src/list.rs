use alloc::vec::Vec;
use core::fmt;
use core::mem;
use core::num::NonZeroUsize;

/// Stable handle to a node in a [`List`].
///
/// A handle stays valid until its node is removed. After that the slot may be
/// reused by a later `add`, so callers must drop handles of removed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A node in the doubly linked list.
///
/// Contains a value and the handles of the previous and next nodes.
#[derive(Debug)]
struct Node<T> {
    val: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// One arena slot. Vacant slots form an intrusive free list.
#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// A doubly linked list with fixed capacity, backed by an arena of slots.
///
/// Nodes live in a `Vec` and link to each other by [`NodeId`], so there are no
/// raw pointers and no aliasing between the list and whoever holds handles
/// into it. Removed slots are threaded onto a free list and reused by the next
/// `add`, which keeps steady-state churn allocation free.
///
/// The front of the list is the most recently added or moved node; the back is
/// the least recent one.
pub(crate) struct List<T> {
    /// Maximum number of items the list can hold.
    cap: NonZeroUsize,
    /// Current number of items in the list.
    len: usize,
    slots: Vec<Slot<T>>,
    /// Head of the vacant slot chain.
    free: Option<usize>,
    /// Most recent node.
    head: Option<NodeId>,
    /// Least recent node.
    tail: Option<NodeId>,
}

impl<T> List<T> {
    /// Creates a new list that holds at most `cap` items, reserving room for
    /// up to `reserve` nodes up front.
    pub(crate) fn new(cap: NonZeroUsize, reserve: usize) -> List<T> {
        List {
            cap,
            len: 0,
            slots: Vec::with_capacity(reserve.min(cap.get())),
            free: None,
            head: None,
            tail: None,
        }
    }

    /// Returns the maximum number of items the list can hold.
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Returns the current number of items in the list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    /// Handle of the least recently used node.
    pub(crate) fn back(&self) -> Option<NodeId> {
        self.tail
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns the handle of the new node, or `None` if the list is full.
    pub(crate) fn add(&mut self, v: T) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }
        let node = Slot::Occupied(Node {
            val: v,
            prev: None,
            next: None,
        });
        let id = match self.free {
            Some(idx) => {
                if let Slot::Vacant { next_free } = mem::replace(&mut self.slots[idx], node) {
                    self.free = next_free;
                }
                NodeId(idx)
            }
            None => {
                self.slots.push(node);
                NodeId(self.slots.len() - 1)
            }
        };
        self.attach(id);
        self.len += 1;
        Some(id)
    }

    /// Unlinks `id` and returns its value, releasing the slot for reuse.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        self.node(id)?;
        self.detach(id);
        let slot = mem::replace(
            &mut self.slots[id.0],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(id.0);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => Some(node.val),
            Slot::Vacant { .. } => None,
        }
    }

    /// Removes the last (least recently used) item from the list.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Moves a node to the front of the list.
    ///
    /// Returns `false` if `id` does not refer to a live node.
    pub(crate) fn move_to_front(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach(id);
        true
    }

    /// Replaces the value stored in `id`, returning the old one.
    pub(crate) fn update(&mut self, id: NodeId, v: T) -> Option<T> {
        self.node_mut(id).map(|node| mem::replace(&mut node.val, v))
    }

    pub(crate) fn get_value(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.val)
    }

    pub(crate) fn get_value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.val)
    }

    /// Removes every node. Reserved slot storage is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates values from front (most recent) to back (least recent).
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Links a detached node in right after the head.
    fn attach(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|head| self.node_mut(head)) {
            Some(head) => head.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Unlinks a node from its neighbors without releasing its slot.
    fn detach(&mut self, id: NodeId) {
        let (prev, next) = match self.node_mut(id) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };
        match prev.and_then(|p| self.node_mut(p)) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Walks the list in both directions and checks every link.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let mut forward = Vec::new();
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self.node(id).expect("linked node must be occupied");
            assert_eq!(node.prev, prev, "broken back link at {:?}", id);
            forward.push(id);
            assert!(forward.len() <= self.len, "cycle in list");
            prev = Some(id);
            current = node.next;
        }
        assert_eq!(prev, self.tail, "tail does not end the forward walk");
        assert_eq!(forward.len(), self.len);
        assert!(self.len <= self.cap.get());

        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(occupied, self.len, "unlinked occupied slot");
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("capacity", &self.cap)
            .field("length", &self.len)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current?)?;
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
