//! The module definition a probe hands to the interpreter.

use std::cell::UnsafeCell;
use std::ffi::CStr;
use std::ptr;

use crate::ffi;
use crate::methods::MethodTable;
use crate::slots::{GilRequirement, SlotTable};

/// `Sync` wrapper of `ffi::PyModuleDef` for a probe module.
///
/// The definition has no docstring, no per-module state and no GC hooks; all
/// it carries is the registered name and the two tables.
pub struct ProbeModuleDef {
    // wrapped in UnsafeCell so that Rust compiler treats this as interior mutability
    ffi_def: UnsafeCell<ffi::PyModuleDef>,
    name: &'static CStr,
    methods: &'static MethodTable,
    slots: &'static SlotTable,
}

unsafe impl Sync for ProbeModuleDef {}

impl ProbeModuleDef {
    /// Make new module definition with given module name and tables.
    pub const fn new(
        name: &'static CStr,
        methods: &'static MethodTable,
        slots: &'static SlotTable,
    ) -> Self {
        const INIT: ffi::PyModuleDef = ffi::PyModuleDef {
            m_base: ffi::PyModuleDef_HEAD_INIT,
            m_name: ptr::null(),
            m_doc: ptr::null(),
            m_size: 0,
            m_methods: ptr::null_mut(),
            m_slots: ptr::null_mut(),
            m_traverse: None,
            m_clear: None,
            m_free: None,
        };

        let ffi_def = UnsafeCell::new(ffi::PyModuleDef {
            m_name: name.as_ptr(),
            m_methods: methods.as_ptr(),
            m_slots: slots.as_ptr(),
            ..INIT
        });

        ProbeModuleDef {
            ffi_def,
            name,
            methods,
            slots,
        }
    }

    /// The name the module is registered (and imported) under.
    pub const fn name(&self) -> &'static CStr {
        self.name
    }

    pub const fn gil_requirement(&self) -> GilRequirement {
        self.slots.requirement()
    }

    pub const fn methods(&self) -> &'static MethodTable {
        self.methods
    }

    pub const fn slots(&self) -> &'static SlotTable {
        self.slots
    }

    /// Return module def
    pub fn module_def(&'static self) -> *mut ffi::PyModuleDef {
        self.ffi_def.get()
    }

    /// Hands the definition to the interpreter for multi-phase initialization.
    ///
    /// This is the whole body of a probe's `PyInit_*` entry point.
    ///
    /// # Safety
    ///
    /// Must only be called from the interpreter's import machinery, with the
    /// calling thread attached to the interpreter.
    pub unsafe fn init(&'static self) -> *mut ffi::PyObject {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            module = %self.name.to_string_lossy(),
            gil = ?self.gil_requirement(),
            gil_slot = self.slots.declares_gil_slot(),
            "handing probe module definition to the interpreter"
        );

        unsafe { ffi::PyModuleDef_Init(self.module_def()) }
    }
}
