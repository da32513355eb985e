// Copyright 2025-2026 Neil Henderson
//
//! The `tacky` module defines the three-address code IR produced by the translator.

use std::fmt;

use crate::core::Type;

/// The root of the IR for one compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TackyRoot {
    pub functions: Vec<TackyFunction>,
    pub statics: Vec<TackyStaticVariable>,
    pub externs: Vec<TackyExtern>,
}

/// A function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TackyFunction {
    pub name: String,
    pub is_global: bool,
    pub params: Vec<String>,
    pub instructions: Vec<TackyInstruction>,
}

/// A variable with static storage and its initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct TackyStaticVariable {
    pub name: String,
    pub is_global: bool,
    pub ty: Type,
    pub init: i64,
}

/// A function defined outside the compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TackyExtern {
    pub name: String,
}

/// A jump target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TackyLabel(pub String);

/// An IR instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum TackyInstruction {
    Return(TackyValue),
    SignExtend { src: TackyValue, dst: TackyValue },
    Truncate { src: TackyValue, dst: TackyValue },
    Unary { op: TackyUnaryOp, src: TackyValue, dst: TackyValue },
    Binary { op: TackyBinaryOp, src1: TackyValue, src2: TackyValue, dst: TackyValue },
    Copy { src: TackyValue, dst: TackyValue },
    Jump { target: TackyLabel },
    JumpIfZero { condition: TackyValue, target: TackyLabel },
    JumpIfNotZero { condition: TackyValue, target: TackyLabel },
    Label { id: TackyLabel },
    FunctionCall { name: String, args: Vec<TackyValue>, dst: TackyValue },
}

/// An IR value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TackyValue {
    Constant(TackyConstant),
    StringConstant(String),
    Variable(String),
}

/// A constant, which carries its own width.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TackyConstant {
    Int32(i32),
    Int64(i64),
}

/// A unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TackyUnaryOp {
    Negate,
    Complement,
    LogicalNot,
}

/// A binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TackyBinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
}

impl TackyValue {
    /// Creates an `Int32` constant value.
    pub fn int32(value: i32) -> Self {
        TackyValue::Constant(TackyConstant::Int32(value))
    }

    /// Creates a variable value.
    pub fn var(name: impl Into<String>) -> Self {
        TackyValue::Variable(name.into())
    }

    /// Creates the constant `value` with the width of the given type.
    pub fn constant_of_type(value: i32, ty: &Type) -> Self {
        match ty {
            Type::Int64 => TackyValue::Constant(TackyConstant::Int64(value.into())),
            _ => TackyValue::Constant(TackyConstant::Int32(value)),
        }
    }
}

impl TackyLabel {
    /// The label's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TackyBinaryOp {
    /// Is this a relational operator?
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TackyBinaryOp::EqualTo
                | TackyBinaryOp::NotEqualTo
                | TackyBinaryOp::LessThan
                | TackyBinaryOp::LessThanOrEqualTo
                | TackyBinaryOp::GreaterThan
                | TackyBinaryOp::GreaterThanOrEqualTo
        )
    }
}

impl fmt::Display for TackyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TackyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TackyValue::Constant(TackyConstant::Int32(value)) => write!(f, "{value}"),
            TackyValue::Constant(TackyConstant::Int64(value)) => write!(f, "{value}L"),
            TackyValue::StringConstant(text) => write!(f, "{text:?}"),
            TackyValue::Variable(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for TackyUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TackyUnaryOp::Negate => write!(f, "neg"),
            TackyUnaryOp::Complement => write!(f, "bitnot"),
            TackyUnaryOp::LogicalNot => write!(f, "not"),
        }
    }
}

impl fmt::Display for TackyBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TackyBinaryOp::Add => write!(f, "add"),
            TackyBinaryOp::Subtract => write!(f, "sub"),
            TackyBinaryOp::Multiply => write!(f, "mul"),
            TackyBinaryOp::Divide => write!(f, "div"),
            TackyBinaryOp::Remainder => write!(f, "rem"),
            TackyBinaryOp::EqualTo => write!(f, "eq"),
            TackyBinaryOp::NotEqualTo => write!(f, "ne"),
            TackyBinaryOp::LessThan => write!(f, "lt"),
            TackyBinaryOp::LessThanOrEqualTo => write!(f, "le"),
            TackyBinaryOp::GreaterThan => write!(f, "gt"),
            TackyBinaryOp::GreaterThanOrEqualTo => write!(f, "ge"),
        }
    }
}
