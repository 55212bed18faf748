use std::ffi::CStr;
use std::fmt;
use std::str::FromStr;

use crate::err::UnknownProbeError;
use crate::slots::GilRequirement;

/// The probe modules this workspace builds, one `cdylib` each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeVariant {
    /// `gil_disable`: declares `Py_mod_gil = Py_MOD_GIL_NOT_USED`.
    GilDisable,
    /// `gil_enable`: omits the `Py_mod_gil` slot.
    GilEnable,
}

impl ProbeVariant {
    pub const ALL: [ProbeVariant; 2] = [ProbeVariant::GilDisable, ProbeVariant::GilEnable];

    /// The name the module is imported under.
    pub const fn name(self) -> &'static str {
        match self {
            ProbeVariant::GilDisable => "gil_disable",
            ProbeVariant::GilEnable => "gil_enable",
        }
    }

    pub const fn module_name(self) -> &'static CStr {
        match self {
            ProbeVariant::GilDisable => c"gil_disable",
            ProbeVariant::GilEnable => c"gil_enable",
        }
    }

    /// The exported initialization symbol, `PyInit_<name>`.
    pub const fn init_symbol(self) -> &'static str {
        match self {
            ProbeVariant::GilDisable => "PyInit_gil_disable",
            ProbeVariant::GilEnable => "PyInit_gil_enable",
        }
    }

    pub const fn gil_requirement(self) -> GilRequirement {
        match self {
            ProbeVariant::GilDisable => GilRequirement::NotUsed,
            ProbeVariant::GilEnable => GilRequirement::Unspecified,
        }
    }
}

impl fmt::Display for ProbeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProbeVariant {
    type Err = UnknownProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProbeVariant::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| UnknownProbeError::new(s))
    }
}
