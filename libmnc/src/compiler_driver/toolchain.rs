// Copyright 2025-2026 Neil Henderson
//
//! The `toolchain` module builds the assembler and linker commands which turn an emitted `.s` file into an
//! executable. The commands are returned to the caller to run; this module never spawns them.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use super::options::TargetOs;

const DARWIN_SDK_ROOT: &str = "/Library/Developer/CommandLineTools/SDKs/MacOSX.sdk";

/// Builds the external assembler and linker commands for a target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Toolchain {
    target_os: TargetOs,
    arm64_host: bool,
}

impl Toolchain {
    /// A toolchain for the given target running on the current host.
    pub fn new(target_os: TargetOs) -> Self {
        Self { target_os, arm64_host: cfg!(target_arch = "aarch64") }
    }

    /// A toolchain for the given target, with the host architecture given explicitly.
    ///
    /// On an arm64 Darwin host the x86-64 tools run under Rosetta via `arch -x86_64`.
    pub fn with_host(target_os: TargetOs, arm64_host: bool) -> Self {
        Self { target_os, arm64_host }
    }

    /// The command which assembles `asm_file` into `obj_file`.
    pub fn assemble_command(&self, asm_file: &Path, obj_file: &Path) -> Command {
        let mut cmd = self.tool("as");

        if self.target_os == TargetOs::Darwin {
            cmd.args(["-arch", "x86_64"]);
        }

        cmd.arg("-o").arg(obj_file).arg(asm_file);
        cmd
    }

    /// The command which links `obj_file` with the given libraries into the executable `exe_file`.
    pub fn link_command<I, S>(&self, obj_file: &Path, exe_file: &Path, libs: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.tool("ld");

        if self.target_os == TargetOs::Darwin {
            cmd.args(["-arch", "x86_64", "-e", "_main", "-no_pie", "-lSystem", "-syslibroot", DARWIN_SDK_ROOT]);
        }

        cmd.arg("-o").arg(exe_file).arg(obj_file);
        cmd.args(libs);
        cmd
    }

    fn tool(&self, program: &str) -> Command {
        if self.target_os == TargetOs::Darwin && self.arm64_host {
            let mut cmd = Command::new("arch");
            cmd.arg("-x86_64").arg(program);
            cmd
        } else {
            Command::new(program)
        }
    }
}
