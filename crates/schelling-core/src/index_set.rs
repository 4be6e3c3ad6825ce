//! Index Set
//!
//! Membership set over dense ids `0..capacity` with O(1) insert, remove and
//! uniform random choice. Members live in a packed `Vec`; a slot table maps each
//! id to its position so removal can swap the last member into the hole.
//!
//! Iteration and choice order depend only on the history of inserts and removes,
//! so a seeded generator reproduces the same picks.

use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    members: Vec<usize>,
    slots: Vec<Option<usize>>,
}

impl IndexSet {
    /// Empty set able to hold ids below `capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            slots: vec![None; capacity],
        }
    }

    /// Set holding every id in `0..capacity`, in ascending order
    pub fn full(capacity: usize) -> Self {
        Self {
            members: (0..capacity).collect(),
            slots: (0..capacity).map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.slots.get(id).is_some_and(Option::is_some)
    }

    /// Insert `id`. Returns false if it was already present.
    pub fn insert(&mut self, id: usize) -> bool {
        if id >= self.slots.len() {
            self.slots.resize(id + 1, None);
        }
        if self.slots[id].is_some() {
            return false;
        }
        self.slots[id] = Some(self.members.len());
        self.members.push(id);
        self.debug_assert_coherent();
        true
    }

    /// Remove `id`. Returns false if it was not present.
    pub fn remove(&mut self, id: usize) -> bool {
        let Some(index) = self.slots.get_mut(id).and_then(Option::take) else {
            return false;
        };
        let removed = self.members.swap_remove(index);
        debug_assert_eq!(removed, id);
        if index < self.members.len() {
            let moved = self.members[index];
            self.slots[moved] = Some(index);
        }
        self.debug_assert_coherent();
        true
    }

    /// Pick a member uniformly at random without removing it
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.members[rng.gen_range(0..self.members.len())])
    }

    /// Members in internal (history-dependent) order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    fn debug_assert_coherent(&self) {
        debug_assert!(self
            .members
            .iter()
            .enumerate()
            .all(|(index, &id)| self.slots[id] == Some(index)));
    }
}
