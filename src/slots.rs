//! The slot table of a probe's module definition.

use std::cell::UnsafeCell;
use std::os::raw::c_void;
use std::ptr;

use crate::ffi;

/// Whether a probe declares that it can run without the GIL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GilRequirement {
    /// The slot table carries `Py_mod_gil = Py_MOD_GIL_NOT_USED`.
    NotUsed,
    /// The slot table has no `Py_mod_gil` entry. A free-threaded interpreter
    /// treats such a module as needing the GIL and re-enables it on import.
    Unspecified,
}

impl GilRequirement {
    /// Whether the slot table built for this requirement contains a `Py_mod_gil` entry.
    ///
    /// Always `false` when built against Python older than 3.13, which rejects the slot.
    pub const fn declares_slot(self) -> bool {
        matches!(self, GilRequirement::NotUsed) && cfg!(Py_3_13)
    }
}

const SENTINEL: ffi::PyModuleDef_Slot = ffi::PyModuleDef_Slot {
    slot: 0,
    value: ptr::null_mut(),
};

#[cfg(Py_3_13)]
const GIL_NOT_USED: ffi::PyModuleDef_Slot = ffi::PyModuleDef_Slot {
    slot: ffi::Py_mod_gil,
    value: ffi::Py_MOD_GIL_NOT_USED,
};

#[cfg(not(Py_3_13))]
const GIL_NOT_USED: ffi::PyModuleDef_Slot = SENTINEL;

/// Sentinel-terminated `PyModuleDef_Slot` array with room for the single
/// optional `Py_mod_gil` entry.
pub struct SlotTable {
    // wrapped in UnsafeCell so that Rust compiler treats this as interior mutability
    slots: UnsafeCell<[ffi::PyModuleDef_Slot; 2]>,
    requirement: GilRequirement,
}

unsafe impl Sync for SlotTable {}

impl SlotTable {
    pub const fn new(requirement: GilRequirement) -> Self {
        let first = if requirement.declares_slot() {
            GIL_NOT_USED
        } else {
            SENTINEL
        };
        SlotTable {
            slots: UnsafeCell::new([first, SENTINEL]),
            requirement,
        }
    }

    pub const fn requirement(&self) -> GilRequirement {
        self.requirement
    }

    /// Pointer to the first slot, as stored in `PyModuleDef::m_slots`.
    pub const fn as_ptr(&self) -> *mut ffi::PyModuleDef_Slot {
        self.slots.get().cast()
    }

    /// The real entries, without the sentinel.
    pub fn entries(&self) -> &[ffi::PyModuleDef_Slot] {
        // The interpreter only ever reads the slot table.
        let slots = unsafe { &*self.slots.get() };
        let len = slots
            .iter()
            .position(|slot| slot.slot == 0)
            .unwrap_or(slots.len());
        &slots[..len]
    }

    /// The value of the `Py_mod_gil` entry, if the table has one.
    pub fn gil_slot(&self) -> Option<*mut c_void> {
        #[cfg(Py_3_13)]
        return self
            .entries()
            .iter()
            .find(|slot| slot.slot == ffi::Py_mod_gil)
            .map(|slot| slot.value);

        #[cfg(not(Py_3_13))]
        return None;
    }

    pub fn declares_gil_slot(&self) -> bool {
        self.gil_slot().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NOT_USED: SlotTable = SlotTable::new(GilRequirement::NotUsed);
    static UNSPECIFIED: SlotTable = SlotTable::new(GilRequirement::Unspecified);

    static_assertions::assert_impl_all!(SlotTable: Sync);

    fn raw(table: &SlotTable) -> [ffi::PyModuleDef_Slot; 2] {
        unsafe { *table.as_ptr().cast::<[ffi::PyModuleDef_Slot; 2]>() }
    }

    #[test]
    fn unspecified_table_is_only_sentinels() {
        assert!(UNSPECIFIED.entries().is_empty());
        assert!(!UNSPECIFIED.declares_gil_slot());
        assert_eq!(UNSPECIFIED.requirement(), GilRequirement::Unspecified);
        for slot in raw(&UNSPECIFIED) {
            assert_eq!(slot.slot, 0);
            assert!(slot.value.is_null());
        }
    }

    #[test]
    #[cfg(Py_3_13)]
    fn not_used_table_declares_gil_slot() {
        let entries = NOT_USED.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slot, ffi::Py_mod_gil);
        assert_eq!(entries[0].value, ffi::Py_MOD_GIL_NOT_USED);
        assert_eq!(NOT_USED.gil_slot(), Some(ffi::Py_MOD_GIL_NOT_USED));
        assert!(GilRequirement::NotUsed.declares_slot());
    }

    #[test]
    #[cfg(not(Py_3_13))]
    fn not_used_table_is_empty_before_3_13() {
        assert!(NOT_USED.entries().is_empty());
        assert!(!NOT_USED.declares_gil_slot());
        assert!(!GilRequirement::NotUsed.declares_slot());
    }

    #[test]
    fn tables_end_with_sentinel() {
        for table in [&NOT_USED, &UNSPECIFIED] {
            let last = raw(table)[1];
            assert_eq!(last.slot, 0);
            assert!(last.value.is_null());
        }
        assert_eq!(NOT_USED.requirement(), GilRequirement::NotUsed);
    }

    #[test]
    fn unspecified_never_declares_slot() {
        assert!(!GilRequirement::Unspecified.declares_slot());
    }
}
