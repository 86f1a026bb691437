// pool.rs - Fixed-capacity slot arena
//
// Every particle pool is allocated once. A slot is either claimed (drawn,
// simulated) or free (parked). Claim and release are O(1) via a free
// stack plus a back-index, so a specific parked slot can also be
// reclaimed in place.

const NOT_FREE: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub struct SlotPool {
    // Stack of free slot indices; claim pops from the end.
    free: Vec<u32>,
    // Position of each slot inside `free`, or NOT_FREE.
    at: Vec<u32>,
}

impl SlotPool {
    /// Pool with every slot free. Claims hand out slot 0 first.
    pub fn vacant(capacity: usize) -> Self {
        let mut pool = Self { free: Vec::with_capacity(capacity), at: vec![NOT_FREE; capacity] };
        pool.release_all();
        pool
    }

    /// Pool with every slot claimed.
    pub fn occupied(capacity: usize) -> Self {
        Self { free: Vec::with_capacity(capacity), at: vec![NOT_FREE; capacity] }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.at.len()
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.capacity() - self.free.len()
    }

    #[inline]
    pub fn is_free(&self, i: usize) -> bool {
        self.at[i] != NOT_FREE
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// Take any free slot. `None` when the pool is saturated.
    pub fn claim(&mut self) -> Option<usize> {
        let i = self.free.pop()? as usize;
        self.at[i] = NOT_FREE;
        Some(i)
    }

    /// Take slot `i` specifically. False if it was already claimed.
    pub fn claim_at(&mut self, i: usize) -> bool {
        let k = self.at[i];
        if k == NOT_FREE { return false; }

        let k = k as usize;
        self.free.swap_remove(k);
        if let Some(&moved) = self.free.get(k) {
            self.at[moved as usize] = k as u32;
        }
        self.at[i] = NOT_FREE;
        true
    }

    /// Return slot `i`. False if it was already free.
    pub fn release(&mut self, i: usize) -> bool {
        if self.is_free(i) { return false; }
        self.at[i] = self.free.len() as u32;
        self.free.push(i as u32);
        true
    }

    pub fn release_all(&mut self) {
        self.free.clear();
        // Reverse so the lowest index sits on top of the stack.
        for i in (0..self.capacity()).rev() {
            self.at[i] = self.free.len() as u32;
            self.free.push(i as u32);
        }
    }

    pub fn claim_all(&mut self) {
        self.free.clear();
        self.at.fill(NOT_FREE);
    }

    /// Indices of claimed slots, ascending.
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.capacity()).filter(|&i| !self.is_free(i))
    }
}
