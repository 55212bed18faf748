//! `gil_enable`: a probe module without a `Py_mod_gil` slot. Importing it into a
//! free-threaded interpreter re-enables the GIL.

gil_probe::probe_module! {
    /// Initialization entry point of `gil_enable`.
    PyInit_gil_enable => gil_probe::ProbeVariant::GilEnable
}
