/// Declares a probe module: its method table, slot table, module definition and
/// `PyInit_<name>` entry point.
///
/// Each probe crate is a single invocation of this macro with a different
/// [`ProbeVariant`](crate::ProbeVariant); the variant fixes both the registered
/// name and whether the `Py_mod_gil` slot is declared. The expansion also
/// defines a public `MODULE_DEF` static, so the descriptors can be inspected
/// without starting an interpreter.
///
/// The entry point must be named after the variant's module name. A mismatch is
/// a compile-time error, because the interpreter looks the symbol up by name.
///
/// # Examples
///
/// ```rust,ignore
/// gil_probe::probe_module! {
///     /// Imported as `gil_disable`.
///     PyInit_gil_disable => gil_probe::ProbeVariant::GilDisable
/// }
/// ```
#[macro_export]
macro_rules! probe_module {
    ($(#[$meta:meta])* $init:ident => $variant:expr $(,)?) => {
        const _: () = ::std::assert!(
            $crate::impl_::str_eq(::std::stringify!($init), $variant.init_symbol()),
            "the init function must be named `PyInit_` followed by the probe's module name",
        );

        static METHODS: $crate::MethodTable = $crate::MethodTable::new();
        static SLOTS: $crate::SlotTable = $crate::SlotTable::new($variant.gil_requirement());

        /// The definition handed to the interpreter on import.
        pub static MODULE_DEF: $crate::ProbeModuleDef =
            $crate::ProbeModuleDef::new($variant.module_name(), &METHODS, &SLOTS);

        $(#[$meta])*
        #[allow(non_snake_case, reason = "must be named `PyInit_<your_module>`")]
        #[no_mangle]
        pub unsafe extern "C" fn $init() -> *mut $crate::ffi::PyObject {
            unsafe { MODULE_DEF.init() }
        }
    };
}
