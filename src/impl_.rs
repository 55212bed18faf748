//! Implementation details of [`probe_module!`](crate::probe_module) which need to be
//! accessible from macro generated code.

/// `const` string equality, used to check the init symbol against the probe's name.
pub const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
