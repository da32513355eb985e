// Copyright 2025-2026 Neil Henderson
//
//! The `registers` module defines the x86_64 hardware registers.

use std::fmt;

/// The general purpose hardware registers used by the code generator.
///
/// A register has no width of its own; the 8, 32 or 64-bit alias is chosen at emission by the instruction it
/// appears in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum HwRegister {
    AX,
    CX,
    DX,
    DI,
    SI,
    R8,
    R9,
    R10,
    R11,
    SP,
    BP,
}

impl fmt::Display for HwRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(8))
    }
}

impl HwRegister {
    /// The register's name, without the `%` prefix, for an operand of the given size in bytes.
    ///
    /// `1` gives the low byte (used by `setcc`), `4` the 32-bit alias and anything else the full 64-bit register.
    #[rustfmt::skip]
    pub fn name(&self, size_bytes: usize) -> &'static str {
        match (self, size_bytes) {
            (HwRegister::AX,  1) => "al",
            (HwRegister::AX,  4) => "eax",
            (HwRegister::AX,  _) => "rax",

            (HwRegister::CX,  1) => "cl",
            (HwRegister::CX,  4) => "ecx",
            (HwRegister::CX,  _) => "rcx",

            (HwRegister::DX,  1) => "dl",
            (HwRegister::DX,  4) => "edx",
            (HwRegister::DX,  _) => "rdx",

            (HwRegister::DI,  1) => "dil",
            (HwRegister::DI,  4) => "edi",
            (HwRegister::DI,  _) => "rdi",

            (HwRegister::SI,  1) => "sil",
            (HwRegister::SI,  4) => "esi",
            (HwRegister::SI,  _) => "rsi",

            (HwRegister::R8,  1) => "r8b",
            (HwRegister::R8,  4) => "r8d",
            (HwRegister::R8,  _) => "r8",

            (HwRegister::R9,  1) => "r9b",
            (HwRegister::R9,  4) => "r9d",
            (HwRegister::R9,  _) => "r9",

            (HwRegister::R10, 1) => "r10b",
            (HwRegister::R10, 4) => "r10d",
            (HwRegister::R10, _) => "r10",

            (HwRegister::R11, 1) => "r11b",
            (HwRegister::R11, 4) => "r11d",
            (HwRegister::R11, _) => "r11",

            // The stack and frame pointers are only ever used as 64-bit registers.
            (HwRegister::SP,  _) => "rsp",
            (HwRegister::BP,  _) => "rbp",
        }
    }

    /// The register which holds the integer argument at `index` in the System V calling convention.
    pub fn integer_argument(index: usize) -> Option<HwRegister> {
        match index {
            0 => Some(HwRegister::DI),
            1 => Some(HwRegister::SI),
            2 => Some(HwRegister::DX),
            3 => Some(HwRegister::CX),
            4 => Some(HwRegister::R8),
            5 => Some(HwRegister::R9),
            _ => None,
        }
    }
}
