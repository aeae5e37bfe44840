//! Fixed-capacity handle table for resident pools

use log::{debug, warn};

use super::instance::PoolInstance;

/// Unique identifier for a registered pool instance
pub type Handle = u8;

/// Sentinel meaning "no handle"; never returned for a live registration
pub const NO_HANDLE: Handle = 0;

/// Bounded table mapping handles onto pool instances
///
/// Slot `i` backs handle `i + 1`, so handle 0 stays reserved as the
/// invalid value. Allocation scans from a rotating cursor rather than
/// from the lowest slot, so a freed handle is not immediately reissued
/// to the next load.
#[derive(Debug)]
pub struct PoolRegistry {
    slots: Vec<Option<PoolInstance>>,
    cursor: usize,
    live: usize,
}

impl PoolRegistry {
    /// Create a registry with the given slot count
    ///
    /// The caller validates the capacity; handles are `u8`, so at most
    /// 255 slots are addressable.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            cursor: 0,
            live: 0,
        }
    }

    /// Create a registry with the default slot count
    pub fn with_default_capacity() -> Self {
        Self::new(crate::defaults::MAX_POOLS)
    }

    /// Total slot count
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check whether no instances are registered
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Check whether every slot is taken
    pub fn is_full(&self) -> bool {
        self.live == self.slots.len()
    }

    /// Store an instance and hand back its handle
    ///
    /// `None` when every slot is taken; the caller discards the
    /// instance.
    pub fn register(&mut self, instance: PoolInstance) -> Option<Handle> {
        let Some(handle) = self.allocate() else {
            warn!("pool table full: {} slots in use", self.slots.len());
            return None;
        };
        self.slots[(handle - 1) as usize] = Some(instance);
        self.live += 1;
        debug!("registered pool on handle {}", handle);
        Some(handle)
    }

    /// Look up an instance by handle
    ///
    /// Unknown or freed handles yield `None`, never an error.
    pub fn lookup(&self, handle: Handle) -> Option<&PoolInstance> {
        self.index(handle).and_then(|i| self.slots[i].as_ref())
    }

    /// Look up an instance by handle for mutation
    pub fn lookup_mut(&mut self, handle: Handle) -> Option<&mut PoolInstance> {
        self.index(handle).and_then(|i| self.slots[i].as_mut())
    }

    /// Destroy the instance behind a handle and release the slot
    ///
    /// Returns `false` for unknown or already-freed handles.
    pub fn free(&mut self, handle: Handle) -> bool {
        let taken = self.index(handle).and_then(|i| self.slots[i].take());
        match taken {
            Some(_) => {
                self.live -= 1;
                debug!("freed pool handle {}", handle);
                true
            }
            None => false,
        }
    }

    /// Handles of every registered instance, in slot order
    pub fn handles(&self) -> Vec<Handle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| (i + 1) as Handle)
            .collect()
    }

    /// Next free handle starting from the rotating cursor
    fn allocate(&mut self) -> Option<Handle> {
        if self.is_full() {
            return None;
        }
        let capacity = self.slots.len();
        for step in 0..capacity {
            let idx = (self.cursor + step) % capacity;
            if self.slots[idx].is_none() {
                self.cursor = (idx + 1) % capacity;
                return Some((idx + 1) as Handle);
            }
        }
        None
    }

    fn index(&self, handle: Handle) -> Option<usize> {
        let h = handle as usize;
        if h == 0 || h > self.slots.len() {
            None
        } else {
            Some(h - 1)
        }
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
