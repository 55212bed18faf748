//! The method table every probe exports: a single no-op `test_function`.

use std::cell::UnsafeCell;
use std::ffi::CStr;

use crate::ffi;

/// Name under which [`test_function`] is exported.
pub const TEST_FUNCTION_NAME: &CStr = c"test_function";

/// Docstring of [`test_function`].
pub const TEST_FUNCTION_DOC: &CStr = c"Test function";

/// `test_function()`: returns `None`.
///
/// Registered with `METH_NOARGS`, so the interpreter rejects any argument before
/// calling in and `args` is always null.
///
/// # Safety
///
/// Must be called by the interpreter with the calling thread attached.
pub unsafe extern "C" fn test_function(
    _slf: *mut ffi::PyObject,
    _args: *mut ffi::PyObject,
) -> *mut ffi::PyObject {
    unsafe {
        let none = ffi::Py_None();
        ffi::Py_INCREF(none);
        none
    }
}

/// Sentinel-terminated `PyMethodDef` array holding [`test_function`].
pub struct MethodTable {
    // wrapped in UnsafeCell so that Rust compiler treats this as interior mutability
    methods: UnsafeCell<[ffi::PyMethodDef; 2]>,
}

unsafe impl Sync for MethodTable {}

impl MethodTable {
    pub const fn new() -> Self {
        MethodTable {
            methods: UnsafeCell::new([
                ffi::PyMethodDef {
                    ml_name: TEST_FUNCTION_NAME.as_ptr(),
                    ml_meth: ffi::PyMethodDefPointer {
                        PyCFunction: test_function,
                    },
                    ml_flags: ffi::METH_NOARGS,
                    ml_doc: TEST_FUNCTION_DOC.as_ptr(),
                },
                ffi::PyMethodDef::zeroed(),
            ]),
        }
    }

    /// Pointer to the first entry, as stored in `PyModuleDef::m_methods`.
    pub const fn as_ptr(&self) -> *mut ffi::PyMethodDef {
        self.methods.get().cast()
    }

    /// The real entries, without the sentinel.
    pub fn entries(&self) -> &[ffi::PyMethodDef] {
        // The interpreter only ever reads the method table.
        let methods = unsafe { &*self.methods.get() };
        let len = methods
            .iter()
            .position(|method| method.ml_name.is_null())
            .unwrap_or(methods.len());
        &methods[..len]
    }

    /// Exported function names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &CStr> + '_ {
        self.entries()
            .iter()
            .map(|method| unsafe { CStr::from_ptr(method.ml_name) })
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static METHODS: MethodTable = MethodTable::new();

    static_assertions::assert_impl_all!(MethodTable: Sync);

    #[test]
    fn single_noargs_entry() {
        let entries = METHODS.entries();
        assert_eq!(entries.len(), 1);

        let method = &entries[0];
        assert_eq!(method.ml_flags, ffi::METH_NOARGS);
        assert_eq!(unsafe { CStr::from_ptr(method.ml_doc) }, TEST_FUNCTION_DOC);
        let meth = unsafe { method.ml_meth.PyCFunction };
        assert!(meth as usize == test_function as usize);

        let names: Vec<_> = METHODS.names().collect();
        assert_eq!(names, [TEST_FUNCTION_NAME]);
    }

    #[test]
    fn sentinel_is_zeroed() {
        let sentinel = unsafe { &*METHODS.as_ptr().add(1) };
        assert!(sentinel.ml_name.is_null());
        assert!(sentinel.ml_doc.is_null());
        assert_eq!(sentinel.ml_flags, 0);
    }
}
