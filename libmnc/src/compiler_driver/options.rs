// Copyright 2025-2026 Neil Henderson
//
//! The `options` module defines the compiler driver's options.

use std::fmt;

use rustc_hash::FxHashSet;

/// Options that control the compiler driver's behavior.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// The operating system whose assembler conventions the output follows.
    pub target_os: TargetOs,

    /// Prints the Tacky intermediate representation and stops after lowering to IR.
    pub print_ir: bool,

    /// Prints the legalized abstract assembly and stops before emission.
    pub print_asm: bool,

    /// Emits the program entry stub which calls `үндсэн` and exits with its return value.
    pub emit_entry_stub: bool,

    /// Driver flags, see [DriverFlag].
    pub flags: FxHashSet<String>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            target_os: TargetOs::host(),
            print_ir: false,
            print_asm: false,
            emit_entry_stub: true,
            flags: FxHashSet::default(),
        }
    }
}

impl DriverOptions {
    /// Creates options for the given target with all other options at their defaults.
    pub fn for_target(target_os: TargetOs) -> Self {
        Self { target_os, ..Self::default() }
    }

    /// Is the given flag set?
    pub fn is_flag_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}

/// A compiler driver flag.
pub struct DriverFlag;

impl DriverFlag {
    pub const PRINT_TERSE: &'static str = "print-terse";
}

/// The operating system flavour of the emitted assembly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TargetOs {
    Linux,
    Darwin,
}

impl TargetOs {
    /// The operating system the compiler is running on. Anything other than macOS is treated as Linux.
    pub fn host() -> Self {
        if cfg!(target_os = "macos") { TargetOs::Darwin } else { TargetOs::Linux }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetOs::Linux => write!(f, "linux"),
            TargetOs::Darwin => write!(f, "darwin"),
        }
    }
}
