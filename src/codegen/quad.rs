//! QUAD instructions and their textual form.
//!
//! Every instruction renders to exactly one line through [`Display`](fmt::Display),
//! so a program is written out with `to_string` or as a formatting argument.

use crate::ast::{DataType, Identifier, Operator};
use std::fmt;

pub type Quads = Vec<Quad>;

/// Symbolic jump target, resolved to a line number by [`finalize`](super::finalize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(pub u64);

/// Compiler generated temporary variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Temp(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Var(Identifier),
    Temp(Temp),
    Int(i64),
    Float(f64),
}

/// Opcode prefix: `I` for integer instructions, `R` for real ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadType {
    Int,
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadOp {
    Add,
    Sub,
    Mlt,
    Div,
    Eql,
    Nql,
    Grt,
    Lss,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Quad {
    Asn {
        ty: QuadType,
        dst: Identifier,
        src: Operand,
    },
    Inp {
        ty: QuadType,
        dst: Identifier,
    },
    Prt {
        ty: QuadType,
        src: Operand,
    },
    Binary {
        ty: QuadType,
        op: QuadOp,
        dst: Temp,
        lhs: Operand,
        rhs: Operand,
    },
    RealToInt {
        dst: Temp,
        src: Operand,
    },
    IntToReal {
        dst: Temp,
        src: Operand,
    },
    JumpIfZero {
        target: Label,
        cond: Temp,
    },
    Jump(Label),
    Label(Label),
    Halt,
}

impl QuadType {
    /// Common type of two operands; anything involving a float is real.
    pub fn promote(lhs: DataType, rhs: DataType) -> Self {
        if lhs.is_float() || rhs.is_float() {
            Self::Real
        } else {
            Self::Int
        }
    }

    pub fn data_type(self) -> DataType {
        match self {
            Self::Int => DataType::Integer,
            Self::Real => DataType::Float,
        }
    }
}

impl TryFrom<DataType> for QuadType {
    type Error = DataType;
    fn try_from(value: DataType) -> Result<Self, DataType> {
        match value {
            DataType::Integer => Ok(Self::Int),
            DataType::Float => Ok(Self::Real),
            DataType::Unknown => Err(value),
        }
    }
}

impl TryFrom<Operator> for QuadOp {
    type Error = Operator;
    fn try_from(value: Operator) -> Result<Self, Operator> {
        match value {
            Operator::Add => Ok(Self::Add),
            Operator::Subtract => Ok(Self::Sub),
            Operator::Multiply => Ok(Self::Mlt),
            Operator::Divide => Ok(Self::Div),
            Operator::EqualTo => Ok(Self::Eql),
            Operator::NotEqualTo => Ok(Self::Nql),
            Operator::GreaterThan => Ok(Self::Grt),
            Operator::LessThan => Ok(Self::Lss),
            // no single instruction; lowered to an or of two comparisons
            Operator::GreaterThanOrEqualTo | Operator::LessThanOrEqualTo => Err(value),
        }
    }
}

impl From<Temp> for Operand {
    fn from(value: Temp) -> Self {
        Self::Temp(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "_t{}", self.0)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "{name}"),
            Self::Temp(temp) => write!(f, "{temp}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(fl) => write!(f, "{fl:.6}"),
        }
    }
}

impl fmt::Display for QuadType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int => write!(f, "I"),
            Self::Real => write!(f, "R"),
        }
    }
}

impl fmt::Display for QuadOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Sub => write!(f, "SUB"),
            Self::Mlt => write!(f, "MLT"),
            Self::Div => write!(f, "DIV"),
            Self::Eql => write!(f, "EQL"),
            Self::Nql => write!(f, "NQL"),
            Self::Grt => write!(f, "GRT"),
            Self::Lss => write!(f, "LSS"),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Asn { ty, dst, src } => write!(f, "{ty}ASN {dst} {src}"),
            Self::Inp { ty, dst } => write!(f, "{ty}INP {dst}"),
            Self::Prt { ty, src } => write!(f, "{ty}PRT {src}"),
            Self::Binary {
                ty,
                op,
                dst,
                lhs,
                rhs,
            } => write!(f, "{ty}{op} {dst} {lhs} {rhs}"),
            Self::RealToInt { dst, src } => write!(f, "RTOI {dst} {src}"),
            Self::IntToReal { dst, src } => write!(f, "ITOR {dst} {src}"),
            Self::JumpIfZero { target, cond } => write!(f, "JMPZ {target} {cond}"),
            Self::Jump(target) => write!(f, "JUMP {target}"),
            Self::Label(label) => write!(f, "{label}:"),
            Self::Halt => write!(f, "HALT"),
        }
    }
}
