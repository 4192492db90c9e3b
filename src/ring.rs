//! Arena-backed doubly linked list with O(1) end-to-end relocation.

use alloc::vec::Vec as AllocVec;

/// Stable handle to a node in a [`RingList`].
///
/// A handle stays valid while its node is in the list, including across
/// [`RingList::move_head_to_tail`] and [`RingList::move_tail_to_head`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn slot(self) -> usize {
        self.0
    }
}

struct Node<T> {
    data: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Free { next_free: Option<usize> },
}

/// Doubly linked sequence whose nodes live in a slot arena.
///
/// Neighbour links are handles, never ownership; the list owns every node.
pub struct RingList<T> {
    slots: AllocVec<Slot<T>>,
    free: Option<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    current: Option<NodeId>,
    len: usize,
}

/// Read-only view of one node and its neighbourhood.
pub struct NodeRef<'a, T> {
    list: &'a RingList<T>,
    id: NodeId,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        NodeRef { list: self.list, id: self.id }
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> &'a T {
        self.list.data(self.id)
    }

    pub fn prev(&self) -> Option<NodeRef<'a, T>> {
        self.list.prev(self.id).map(|id| NodeRef { list: self.list, id })
    }

    pub fn next(&self) -> Option<NodeRef<'a, T>> {
        self.list.next(self.id).map(|id| NodeRef { list: self.list, id })
    }
}

impl<T> RingList<T> {
    pub fn new() -> Self {
        RingList {
            slots: AllocVec::new(),
            free: None,
            head: None,
            tail: None,
            current: None,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut list = Self::new();
        list.slots.reserve(capacity);
        list
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn head(&self) -> Option<NodeId> { self.head }
    pub fn tail(&self) -> Option<NodeId> { self.tail }

    /// Most recently inserted or relocated node. Bookkeeping only.
    pub fn current(&self) -> Option<NodeId> { self.current }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.current = None;
        self.len = 0;
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => panic!("stale ring node handle {:?}", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => panic!("stale ring node handle {:?}", id),
        }
    }

    fn data(&self, id: NodeId) -> &T {
        &self.node(id).data
    }

    /// Data of a live node, or `None` for a stale handle.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(&node.data),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(&mut node.data),
            _ => None,
        }
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> { self.node(id).prev }
    pub fn next(&self, id: NodeId) -> Option<NodeId> { self.node(id).next }

    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_, T> {
        debug_assert!(self.get(id).is_some(), "stale ring node handle {:?}", id);
        NodeRef { list: self, id }
    }

    fn allocate(&mut self, data: T) -> NodeId {
        let node = Node { data, prev: None, next: None };
        match self.free {
            Some(slot) => {
                if let Slot::Free { next_free } = self.slots[slot] {
                    self.free = next_free;
                }
                self.slots[slot] = Slot::Occupied(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> T {
        let slot = core::mem::replace(&mut self.slots[id.0], Slot::Free { next_free: self.free });
        self.free = Some(id.0);
        match slot {
            Slot::Occupied(node) => node.data,
            Slot::Free { .. } => panic!("double release of ring node {:?}", id),
        }
    }

    fn link_back(&mut self, id: NodeId) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(id);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.current = Some(id);
        self.len += 1;
    }

    fn link_front(&mut self, id: NodeId) {
        let old_head = self.head;
        {
            let node = self.node_mut(id);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => self.node_mut(head).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.current = Some(id);
        self.len += 1;
    }

    /// Detach a node from its neighbours without releasing its slot.
    fn unlink(&mut self, id: NodeId) {
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        let node = self.node_mut(id);
        node.prev = None;
        node.next = None;
        self.current = prev.or(next);
        self.len -= 1;
    }

    /// Append at the tail.
    pub fn push(&mut self, data: T) -> NodeId {
        let id = self.allocate(data);
        self.link_back(id);
        id
    }

    /// Prepend at the head.
    pub fn unshift(&mut self, data: T) -> NodeId {
        let id = self.allocate(data);
        self.link_front(id);
        id
    }

    /// Remove and return the tail.
    pub fn pop(&mut self) -> Option<T> {
        let id = self.tail?;
        self.unlink(id);
        Some(self.release(id))
    }

    /// Remove and return the head.
    pub fn shift(&mut self) -> Option<T> {
        let id = self.head?;
        self.unlink(id);
        Some(self.release(id))
    }

    /// Remove the node at `position` (0 = head). O(n) scan, O(1) unlink.
    pub fn remove(&mut self, position: usize) -> Option<T> {
        let id = self.node_at(position)?;
        self.unlink(id);
        Some(self.release(id))
    }

    /// Handle of the node at `position`, scanning from the head.
    pub fn node_at(&self, position: usize) -> Option<NodeId> {
        let mut cursor = self.head;
        let mut index = 0;
        while let Some(id) = cursor {
            if index == position {
                return Some(id);
            }
            index += 1;
            cursor = self.next(id);
        }
        None
    }

    /// Relink an existing node at the tail. The node keeps its handle.
    pub fn move_to_back(&mut self, id: NodeId) {
        if self.tail == Some(id) {
            self.current = Some(id);
            return;
        }
        self.unlink(id);
        self.link_back(id);
    }

    /// Relink an existing node at the head. The node keeps its handle.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id) {
            self.current = Some(id);
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    /// Non-copying "shift then push": the head node becomes the tail.
    pub fn move_head_to_tail(&mut self) -> Option<NodeId> {
        let id = self.head?;
        self.move_to_back(id);
        Some(id)
    }

    /// Non-copying "pop then unshift": the tail node becomes the head.
    pub fn move_tail_to_head(&mut self) -> Option<NodeId> {
        let id = self.tail?;
        self.move_to_front(id);
        Some(id)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { list: self, cursor: self.head }
    }

    /// Visit every node in order with its index and neighbourhood view.
    pub fn for_each<C>(&self, mut callback: C)
    where
        C: FnMut(&T, usize, NodeRef<'_, T>),
    {
        let mut cursor = self.head;
        let mut index = 0;
        while let Some(id) = cursor {
            let node = NodeRef { list: self, id };
            callback(node.data(), index, node);
            index += 1;
            cursor = self.next(id);
        }
    }

    /// Build a new list of the same length and order from transformed values.
    pub fn map<U, C>(&self, mut callback: C) -> RingList<U>
    where
        C: FnMut(&T, usize, NodeRef<'_, T>) -> U,
    {
        let mut result = RingList::with_capacity(self.len);
        self.for_each(|data, index, node| {
            result.push(callback(data, index, node));
        });
        result
    }

    pub fn to_vec(&self) -> AllocVec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Default for RingList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for RingList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = RingList::new();
        for item in iter {
            list.push(item);
        }
        list
    }
}

/// Head-to-tail iterator over node data.
pub struct Iter<'a, T> {
    list: &'a RingList<T>,
    cursor: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.cursor?;
        self.cursor = self.list.next(id);
        Some(self.list.data(id))
    }
}

impl<'a, T> IntoIterator for &'a RingList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
