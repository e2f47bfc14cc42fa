// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage for the views of a project.

use alloc::vec::Vec;

/// Identifier for a view in a [`Project`](crate::Project).
///
/// This is a small, copyable handle consisting of a slot index and a
/// generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On removal, the slot is freed; any existing `ViewId` for it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `ViewId`.
///
/// Stale ids never alias a different live view because the generation must
/// match. Host calls made with a stale id are no‑ops.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32, u32);

impl ViewId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    /// Position of the view in its project's views collection.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Generation of the slot when this id was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

#[derive(Clone, Debug)]
struct Slot<V> {
    generation: u32,
    value: Option<V>,
}

/// Slot map from [`ViewId`] to `V`.
#[derive(Clone, Debug)]
pub(crate) struct ViewRegistry<V> {
    slots: Vec<Slot<V>>,
    free: Vec<u32>,
    len: usize,
}

impl<V> ViewRegistry<V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Allocates a slot and fills it with the value built from its id.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(ViewId) -> V) -> ViewId {
        let id = match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                slot.generation = slot.generation.wrapping_add(1);
                ViewId::new(idx, slot.generation)
            }
            None => {
                let idx = slot_index(self.slots.len());
                self.slots.push(Slot {
                    generation: 1,
                    value: None,
                });
                ViewId::new(idx, 1)
            }
        };
        self.slots[id.index()].value = Some(build(id));
        self.len += 1;
        id
    }

    pub(crate) fn remove(&mut self, id: ViewId) -> Option<V> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let value = slot.value.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, id: ViewId) -> Option<&V> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: ViewId) -> Option<&mut V> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ViewId, &V)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let value = slot.value.as_ref()?;
            Some((ViewId::new(slot_index(idx), slot.generation), value))
        })
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a project never holds anywhere near u32::MAX views"
)]
fn slot_index(idx: usize) -> u32 {
    idx as u32
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::ViewRegistry;

    #[test]
    fn insert_get_remove() {
        let mut reg = ViewRegistry::new();
        let a = reg.insert_with(|_| "a");
        let b = reg.insert_with(|_| "b");
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(b), Some(&"b"));

        assert_eq!(reg.remove(a), Some("a"));
        assert_eq!(reg.remove(a), None);
        assert_eq!(reg.get(a), None);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut reg = ViewRegistry::new();
        let a = reg.insert_with(|id| id);
        reg.remove(a);
        let c = reg.insert_with(|id| id);

        assert_eq!(c.index(), a.index());
        assert_ne!(c, a);
        assert_eq!(c.generation(), a.generation() + 1);
        assert_eq!(reg.get(a), None, "stale id must not alias the new view");
        assert_eq!(reg.get(c), Some(&c));
    }

    #[test]
    fn iter_skips_free_slots() {
        let mut reg = ViewRegistry::new();
        let a = reg.insert_with(|_| 1);
        let b = reg.insert_with(|_| 2);
        let c = reg.insert_with(|_| 3);
        reg.remove(b);

        let ids: Vec<_> = reg.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(ids, [(a, 1), (c, 3)]);

        for v in reg.values_mut() {
            *v *= 10;
        }
        assert_eq!(reg.get(c), Some(&30));
    }
}
