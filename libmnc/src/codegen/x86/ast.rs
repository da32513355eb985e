// Copyright 2025-2026 Neil Henderson
//
//! The `ast` module defines the x86_64 Assembly AST for the parent codegen module.

use std::fmt;

use super::registers::HwRegister;
use crate::core::{InternalError, Stage, Type};

/// The root of the assembly AST.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsmRoot {
    pub functions: Vec<AsmFunction>,
    pub statics: Vec<AsmStaticVariable>,
    /// Functions which are called but defined elsewhere.
    pub externs: Vec<String>,
}

/// Assembly data types.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AsmType {
    LongWord,
    QuadWord,
}

impl TryFrom<&Type> for AsmType {
    type Error = InternalError;

    fn try_from(ty: &Type) -> Result<Self, Self::Error> {
        match ty {
            Type::Int32 => Ok(AsmType::LongWord),
            // A string value is the address of its pooled literal.
            Type::Int64 | Type::String => Ok(AsmType::QuadWord),
            Type::Function { .. } => {
                Err(InternalError::unexpected(Stage::InstructionSelection, format!("function type '{ty}' as a value")))
            }
        }
    }
}

impl fmt::Display for AsmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmType::LongWord => write!(f, "LongWord"),
            AsmType::QuadWord => write!(f, "QuadWord"),
        }
    }
}

impl AsmType {
    /// The size in bytes of the type.
    pub fn size_bytes(&self) -> usize {
        match self {
            AsmType::LongWord => 4,
            AsmType::QuadWord => 8,
        }
    }

    /// The natural alignment in bytes that the type requires is the same as its size.
    pub fn alignment_bytes(&self) -> usize {
        self.size_bytes()
    }

    /// Returns the string representing the type that is used in an assembly instruction mnemonic.
    pub fn asm_operand_str(&self) -> &'static str {
        match self {
            AsmType::LongWord => "l",
            AsmType::QuadWord => "q",
        }
    }
}

/// A function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmFunction {
    pub name: String,
    pub is_global: bool,
    pub instructions: Vec<AsmInstruction>,
}

/// A variable with static storage duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmStaticVariable {
    pub name: String,
    pub is_global: bool,
    pub asm_type: AsmType,
    pub init: i64,
}

/// A label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmLabelName(pub String);

impl fmt::Display for AsmLabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInstruction {
    Mov { asm_type: AsmType, src: AsmOperand, dst: AsmOperand },

    // Move and sign extend a LongWord into a QuadWord
    MovSx { src: AsmOperand, dst: AsmOperand },

    Unary { op: AsmUnaryOp, asm_type: AsmType, operand: AsmOperand },
    Binary { op: AsmBinaryOp, asm_type: AsmType, src: AsmOperand, dst: AsmOperand },
    Cmp { asm_type: AsmType, op1: AsmOperand, op2: AsmOperand }, // Calculates `op2 - op1`
    IDiv { asm_type: AsmType, operand: AsmOperand },
    Cdq { asm_type: AsmType },
    Jmp { target: AsmLabelName },
    JmpCC { cond_code: ConditionalCode, target: AsmLabelName },
    SetCC { cond_code: ConditionalCode, operand: AsmOperand },
    Label { id: AsmLabelName },
    Push(AsmOperand),
    Call(String),
    Ret,
}

/// Unary operations
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AsmUnaryOp {
    Neg,
    Not,
}

/// Binary operations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AsmBinaryOp {
    Add,
    Sub,
    Mul,
}

/// An instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmOperand {
    /// An immediate value. Whether it fits the instruction's width is checked by the fixup pass.
    Imm(i64),

    /// A hardware register. Its spelling depends on the width of the instruction it appears in.
    Reg(HwRegister),

    /// A variable which has not been assigned storage yet.
    Pseudo(String),

    /// A stack slot at the given offset from `%rbp`.
    Stack(i32),

    /// A variable with static storage, addressed relative to `%rip`.
    Data(String),

    /// The address of a pooled string literal.
    StringLiteral(String),
}

impl fmt::Display for AsmOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmOperand::Imm(value) => write!(f, "${value}"),
            AsmOperand::Reg(reg) => write!(f, "%{reg}"),
            AsmOperand::Pseudo(name) => write!(f, "{name}"),
            AsmOperand::Stack(offset) => write!(f, "{offset}(%rbp)"),
            AsmOperand::Data(name) => write!(f, "{name}(%rip)"),
            AsmOperand::StringLiteral(text) => write!(f, "{text:?}"),
        }
    }
}

impl AsmOperand {
    /// Is this operand an immediate value?
    pub fn is_immediate(&self) -> bool {
        matches!(self, AsmOperand::Imm(_))
    }

    /// Is this operand an immediate value which does not fit in a sign-extended 32-bit field?
    pub fn is_large_immediate(&self) -> bool {
        matches!(self, AsmOperand::Imm(value) if i32::try_from(*value).is_err())
    }

    /// Is this operand a memory address?
    ///
    /// A string literal counts because its address can only be loaded into a register.
    pub fn is_memory_address(&self) -> bool {
        matches!(self, AsmOperand::Stack(_) | AsmOperand::Data(_) | AsmOperand::StringLiteral(_))
    }

    /// Is this operand a hardware register?
    pub fn is_hw_register(&self) -> bool {
        matches!(self, AsmOperand::Reg(_))
    }

    /// Is this operand a pseudo operand?
    pub fn is_pseudo(&self) -> bool {
        matches!(self, AsmOperand::Pseudo(_))
    }
}

/// Conditional codes for `JmpCC` and `SetCC` instructions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConditionalCode {
    E,
    NE,
    G,
    GE,
    L,
    LE,
}

impl fmt::Display for ConditionalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionalCode::E => write!(f, "e"),
            ConditionalCode::NE => write!(f, "ne"),
            ConditionalCode::G => write!(f, "g"),
            ConditionalCode::GE => write!(f, "ge"),
            ConditionalCode::L => write!(f, "l"),
            ConditionalCode::LE => write!(f, "le"),
        }
    }
}
