//! PositionalList: a doubly-linked sequence addressed by stable positions.
//!
//! Nodes live in a slotmap arena; a [`Position`] is the issuing list's id
//! plus the node's generational key. The generation catches use-after-remove,
//! the list id catches handles presented to a list that never issued them.
//! Either misuse resolves to [`InvalidPosition`] instead of corrupting links.

use core::cell::Cell;
use slotmap::{DefaultKey, SlotMap};
use thiserror::Error;

/// Error returned when a position handle is presented to a list that did not
/// issue it, or after the position was invalidated by removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position does not belong to this list or was removed")]
pub struct InvalidPosition;

/// Opaque handle to one live slot of a [`PositionalList`].
///
/// Positions stay valid across unrelated insertions and removals and are
/// invalidated permanently when their own slot is removed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    list: u64,
    key: DefaultKey,
}

fn next_list_id() -> u64 {
    thread_local! {
        static NEXT: Cell<u64> = const { Cell::new(0) };
    }
    NEXT.with(|c| {
        let id = c.get();
        c.set(id + 1);
        id
    })
}

#[derive(Debug)]
struct Node<T> {
    element: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

/// A positional doubly-linked list.
///
/// Every mutating operation is O(1) given a valid position. Elements are
/// stored in a generational arena, so removed slots are never resurrected
/// under a stale handle even if the physical slot is reused.
#[derive(Debug)]
pub struct PositionalList<T> {
    id: u64,
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> PositionalList<T> {
    pub fn new() -> Self {
        Self {
            id: next_list_id(),
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of the first element, or `None` when empty.
    pub fn first(&self) -> Option<Position> {
        self.head.map(|k| self.position(k))
    }

    /// Position of the last element, or `None` when empty.
    pub fn last(&self) -> Option<Position> {
        self.tail.map(|k| self.position(k))
    }

    /// Position immediately before `pos`, or `Ok(None)` when `pos` is first.
    pub fn before(&self, pos: Position) -> Result<Option<Position>, InvalidPosition> {
        let key = self.resolve(pos)?;
        Ok(self.nodes[key].prev.map(|k| self.position(k)))
    }

    /// Position immediately after `pos`, or `Ok(None)` when `pos` is last.
    pub fn after(&self, pos: Position) -> Result<Option<Position>, InvalidPosition> {
        let key = self.resolve(pos)?;
        Ok(self.nodes[key].next.map(|k| self.position(k)))
    }

    /// Borrows the element at `pos`.
    pub fn get(&self, pos: Position) -> Result<&T, InvalidPosition> {
        let key = self.resolve(pos)?;
        Ok(&self.nodes[key].element)
    }

    /// Mutably borrows the element at `pos`.
    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T, InvalidPosition> {
        let key = self.resolve(pos)?;
        Ok(&mut self.nodes[key].element)
    }

    /// Inserts at the front, returning the new element's position.
    pub fn add_first(&mut self, element: T) -> Position {
        let key = self.nodes.insert(Node {
            element,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => self.nodes[old].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
        self.position(key)
    }

    /// Inserts at the back, returning the new element's position.
    pub fn add_last(&mut self, element: T) -> Position {
        let key = self.nodes.insert(Node {
            element,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => self.nodes[old].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.position(key)
    }

    /// Inserts just before `pos`, returning the new element's position.
    pub fn add_before(&mut self, pos: Position, element: T) -> Result<Position, InvalidPosition> {
        let at = self.resolve(pos)?;
        match self.nodes[at].prev {
            None => Ok(self.add_first(element)),
            Some(prev) => {
                let key = self.nodes.insert(Node {
                    element,
                    prev: Some(prev),
                    next: Some(at),
                });
                self.nodes[prev].next = Some(key);
                self.nodes[at].prev = Some(key);
                Ok(self.position(key))
            }
        }
    }

    /// Inserts just after `pos`, returning the new element's position.
    pub fn add_after(&mut self, pos: Position, element: T) -> Result<Position, InvalidPosition> {
        let at = self.resolve(pos)?;
        match self.nodes[at].next {
            None => Ok(self.add_last(element)),
            Some(next) => {
                let key = self.nodes.insert(Node {
                    element,
                    prev: Some(at),
                    next: Some(next),
                });
                self.nodes[next].prev = Some(key);
                self.nodes[at].next = Some(key);
                Ok(self.position(key))
            }
        }
    }

    /// Replaces the element at `pos`, returning the previous element.
    pub fn set(&mut self, pos: Position, element: T) -> Result<T, InvalidPosition> {
        let key = self.resolve(pos)?;
        Ok(core::mem::replace(&mut self.nodes[key].element, element))
    }

    /// Removes the element at `pos`, invalidating the position permanently.
    pub fn remove(&mut self, pos: Position) -> Result<T, InvalidPosition> {
        let key = self.resolve(pos)?;
        let node = self.nodes.remove(key).ok_or(InvalidPosition)?;
        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        Ok(node.element)
    }

    /// Iterates elements front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Iterates positions front to back.
    pub fn positions(&self) -> Positions<'_, T> {
        Positions {
            list: self,
            cursor: self.head,
        }
    }

    fn position(&self, key: DefaultKey) -> Position {
        Position { list: self.id, key }
    }

    fn resolve(&self, pos: Position) -> Result<DefaultKey, InvalidPosition> {
        if pos.list == self.id && self.nodes.contains_key(pos.key) {
            Ok(pos.key)
        } else {
            Err(InvalidPosition)
        }
    }
}

impl<T: PartialEq> PositionalList<T> {
    /// Linear scan for the first position whose element equals `element`.
    ///
    /// O(n); intended for small bucket scans, not as an ordering primitive.
    pub fn find_position(&self, element: &T) -> Option<Position> {
        self.positions()
            .find(|&p| &self.nodes[p.key].element == element)
    }
}

impl<T> Default for PositionalList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over elements of a [`PositionalList`] in list order.
pub struct Iter<'a, T> {
    list: &'a PositionalList<T>,
    cursor: Option<DefaultKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = &self.list.nodes[key];
        self.cursor = node.next;
        Some(&node.element)
    }
}

/// Iterator over positions of a [`PositionalList`] in list order.
pub struct Positions<'a, T> {
    list: &'a PositionalList<T>,
    cursor: Option<DefaultKey>,
}

impl<'a, T> Iterator for Positions<'a, T> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        self.cursor = self.list.nodes[key].next;
        Some(self.list.position(key))
    }
}
