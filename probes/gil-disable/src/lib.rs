//! `gil_disable`: a probe module that is safe to import on a free-threaded
//! interpreter without re-enabling the GIL.

gil_probe::probe_module! {
    /// Initialization entry point of `gil_disable`.
    ///
    /// Its slot table carries `Py_mod_gil = Py_MOD_GIL_NOT_USED`.
    PyInit_gil_disable => gil_probe::ProbeVariant::GilDisable
}
