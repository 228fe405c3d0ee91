use std::{
    alloc::{self, Layout},
    ptr, slice,
    sync::atomic::{AtomicU8, Ordering},
};

use crate::{error::{Error, Result}, tag::Tag, UNIVERSE};

/// One byte per possible value. Each byte accumulates the tags of every
/// source that produced the value; bits are only ever OR'ed in.
pub struct PresenceTable {
    slots: Box<[AtomicU8]>,
}

/// Value does not fit a table allocated with a reduced universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfUniverse(pub u32);

impl PresenceTable {
    /// Table covering `universe` values; pass [`UNIVERSE`] for every 32-bit
    /// value.
    pub fn allocate(universe: u64) -> Result<Self> {
        let err = || Error::Allocation { universe };

        if universe > UNIVERSE {
            return Err(err());
        }
        let len = usize::try_from(universe).map_err(|_| err())?;
        if len == 0 {
            return Ok(Self { slots: Box::default() });
        }

        let layout = Layout::array::<AtomicU8>(len).map_err(|_| err())?;
        // Zeroed allocations of this size come straight from the OS, so pages
        // are only made resident once a value in them is marked or scanned.
        let data = unsafe { alloc::alloc_zeroed(layout) } as *mut AtomicU8;
        if data.is_null() {
            return Err(err());
        }
        let slots = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(data, len)) };

        Ok(Self { slots })
    }

    pub fn universe(&self) -> u64 {
        self.slots.len() as u64
    }

    /// Atomically apply `table[value] |= tag`.
    #[inline]
    pub fn mark(&self, value: u32, tag: Tag) -> std::result::Result<(), OutOfUniverse> {
        match self.slots.get(value as usize) {
            Some(slot) => {
                slot.fetch_or(tag.bits(), Ordering::Relaxed);
                Ok(())
            }
            None => Err(OutOfUniverse(value)),
        }
    }

    /// Current byte for `value`; zero outside the universe.
    pub fn read(&self, value: u32) -> u8 {
        self.slots
            .get(value as usize)
            .map_or(0, |slot| slot.load(Ordering::Relaxed))
    }

    /// Plain view of every slot. Requires exclusive access, so no marker can
    /// still be writing.
    pub fn slots(&mut self) -> &[u8] {
        // AtomicU8 has the same size and alignment as u8.
        unsafe { slice::from_raw_parts(self.slots.as_ptr() as *const u8, self.slots.len()) }
    }
}
