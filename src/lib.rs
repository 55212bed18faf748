//! Building blocks for `gil_disable` and `gil_enable`, two CPython extension
//! modules used to check how a free-threaded interpreter reacts to a module's
//! `Py_mod_gil` slot.
//!
//! Both modules export the same single no-op function, `test_function()`, and
//! differ only in their registered name and slot table:
//!
//! | module        | `Py_mod_gil` slot      | effect on a free-threaded interpreter            |
//! | ------------- | ---------------------- | ------------------------------------------------ |
//! | `gil_disable` | `Py_MOD_GIL_NOT_USED`  | stays free-threaded                              |
//! | `gil_enable`  | omitted                | re-enables the GIL and emits a `RuntimeWarning`  |
//!
//! The descriptors are plain `static`s built by `const fn`s, and each probe crate
//! is one [`probe_module!`] invocation:
//!
//! ```rust,ignore
//! gil_probe::probe_module!(PyInit_gil_enable => gil_probe::ProbeVariant::GilEnable);
//! ```
//!
//! Against Python older than 3.13 the `Py_mod_gil` slot does not exist, so both
//! probes end up with an empty slot table.

pub use pyo3_ffi as ffi;

mod err;
#[doc(hidden)]
pub mod impl_;
mod macros;
mod methods;
mod module;
mod slots;
mod variant;

pub use crate::err::UnknownProbeError;
pub use crate::methods::{test_function, MethodTable, TEST_FUNCTION_DOC, TEST_FUNCTION_NAME};
pub use crate::module::ProbeModuleDef;
pub use crate::slots::{GilRequirement, SlotTable};
pub use crate::variant::ProbeVariant;
