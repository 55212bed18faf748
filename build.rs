// The slot table depends on the interpreter version (`Py_mod_gil` is 3.13+),
// so the crate needs the same `Py_*` cfgs pyo3-ffi is compiled with.
fn main() {
    pyo3_build_config::use_pyo3_cfgs();
}
