//! Harness for importing the probes into an embedded interpreter.
//!
//! Useful tips for writing tests:
//!  - Call [`prepare_interpreter`] before anything touches the interpreter; the
//!    probes can only be registered as builtin modules before it starts.
//!  - The GIL can be re-enabled only once per process, so every scenario that
//!    imports `gil_enable` lives in its own `tests/*.rs` file.
//!  - `catch_warnings` is process-global; record warnings from one test per file.

use std::sync::Once;

use gil_probe::{ffi, ProbeVariant, UnknownProbeError};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{IntoPyDict, PyModule};

/// Start of the `RuntimeWarning` a free-threaded interpreter emits when an
/// import forces the GIL back on.
pub const GIL_REENABLED_WARNING: &str =
    "The global interpreter lock (GIL) has been enabled to load module";

static PREPARE: Once = Once::new();

/// The `PyInit_*` entry point of `variant`, as linked into this binary.
pub fn init_fn(variant: ProbeVariant) -> unsafe extern "C" fn() -> *mut ffi::PyObject {
    match variant {
        ProbeVariant::GilDisable => gil_disable::PyInit_gil_disable,
        ProbeVariant::GilEnable => gil_enable::PyInit_gil_enable,
    }
}

/// Registers both probes as builtin modules, then starts the interpreter.
///
/// # Panics
///
/// Panics if the interpreter was already running, since the inittab can no
/// longer be extended at that point.
pub fn prepare_interpreter() {
    PREPARE.call_once(|| {
        for variant in ProbeVariant::ALL {
            let ret = unsafe {
                ffi::PyImport_AppendInittab(variant.module_name().as_ptr(), Some(init_fn(variant)))
            };
            assert!(ret != -1, "could not add {variant} to inittab");
        }
        Python::initialize();
    });
}

/// Result of importing a probe while recording warnings.
pub struct Import<'py> {
    pub module: Bound<'py, PyModule>,
    /// `str()` of every warning raised during the import.
    pub warnings: Vec<String>,
}

impl Import<'_> {
    /// Warnings that report the GIL being re-enabled for `variant`.
    pub fn gil_warnings(&self, variant: ProbeVariant) -> Vec<&str> {
        self.warnings
            .iter()
            .map(String::as_str)
            .filter(|message| is_gil_reenabled_warning(message, variant))
            .collect()
    }
}

pub fn is_gil_reenabled_warning(message: &str, variant: ProbeVariant) -> bool {
    message
        .strip_prefix(GIL_REENABLED_WARNING)
        .is_some_and(|rest| rest.starts_with(&format!(" '{variant}'")))
}

/// Imports `variant` inside `warnings.catch_warnings(record=True)`.
pub fn import_recording_warnings(py: Python<'_>, variant: ProbeVariant) -> PyResult<Import<'_>> {
    let warnings = py.import("warnings")?;
    let kwargs = [("record", true)].into_py_dict(py)?;
    let catcher = warnings.call_method("catch_warnings", (), Some(&kwargs))?;
    let log = catcher.call_method0("__enter__")?;
    let imported = warnings
        .call_method1("simplefilter", ("always",))
        .and_then(|_| py.import(variant.name()));
    catcher.call_method1("__exit__", (py.None(), py.None(), py.None()))?;
    let module = imported?;

    let warnings = log
        .try_iter()?
        .map(|warning| warning?.getattr("message")?.str()?.extract::<String>())
        .collect::<PyResult<Vec<_>>>()?;

    Ok(Import { module, warnings })
}

/// Whether `variant` is already in `sys.modules`, so importing it again would
/// not run its init entry point.
pub fn is_imported(py: Python<'_>, variant: ProbeVariant) -> PyResult<bool> {
    py.import("sys")?.getattr("modules")?.contains(variant.name())
}

/// Resolves an imported module back to the probe it was registered as.
///
/// Fails with `ValueError` for modules that are not probes.
pub fn module_variant(module: &Bound<'_, PyModule>) -> PyResult<ProbeVariant> {
    module
        .name()?
        .to_str()?
        .parse()
        .map_err(|err: UnknownProbeError| PyValueError::new_err(err.to_string()))
}

/// Calls `test_function()` on an imported probe.
pub fn call_test_function<'py>(module: &Bound<'py, PyModule>) -> PyResult<Bound<'py, PyAny>> {
    module.call_method0("test_function")
}

/// `sys._is_gil_enabled()`, or `None` on interpreters that predate it.
pub fn gil_enabled(py: Python<'_>) -> PyResult<Option<bool>> {
    let sys = py.import("sys")?;
    if !sys.hasattr("_is_gil_enabled")? {
        return Ok(None);
    }
    sys.call_method0("_is_gil_enabled")?.extract().map(Some)
}

/// Whether the running interpreter is a free-threaded build.
pub fn free_threaded_build(py: Python<'_>) -> PyResult<bool> {
    let flag = py
        .import("sysconfig")?
        .call_method1("get_config_var", ("Py_GIL_DISABLED",))?;
    Ok(!flag.is_none() && flag.is_truthy()?)
}

/// Whether the GIL mode is forced from the environment, which overrides the
/// `Py_mod_gil` slot entirely.
pub fn gil_forced_by_env() -> bool {
    std::env::var_os("PYTHON_GIL").is_some()
}

/// Whether importing probes can change the GIL mode in this process.
pub fn gil_mode_observable(py: Python<'_>) -> PyResult<bool> {
    Ok(free_threaded_build(py)? && !gil_forced_by_env())
}
