use crate::lexer::Position;

pub type Identifier = String;

/// Declared type of a variable, or requested type of a `static_cast`.
///
/// `Unknown` marks a malformed declaration, and an assignment without a cast.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    #[default]
    Unknown,
    Integer,
    Float,
}

impl DataType {
    #[inline]
    pub fn is_float(self) -> bool {
        self == DataType::Float
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        self == DataType::Integer
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub body: Block,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub names: Vec<Identifier>,
    pub data_type: DataType,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub pos: Position,
}

// Fields holding an Option are the places where the parser may have failed
// to build a child. A None child makes its parent generate nothing.

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub variable: Identifier,
    pub value: Option<Exp>,
    pub cast_type: DataType,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub variable: Option<Identifier>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub value: Option<Exp>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Option<BoolExp>,
    pub then: Option<Box<Statement>>,
    pub els: Option<Box<Statement>>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Option<BoolExp>,
    pub body: Option<Box<Statement>>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub selector: Option<Exp>,
    pub cases: Vec<Case>,
    pub default: Vec<Statement>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub value: i64,
    pub body: Vec<Statement>,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(Assignment),
    Input(Input),
    Output(Output),
    If(If),
    While(While),
    Switch(Switch),
    Break(Position),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Exp {
    Var {
        name: Identifier,
        pos: Position,
    },
    Int {
        value: i64,
        pos: Position,
    },
    Float {
        value: f64,
        pos: Position,
    },
    Arithmetic {
        op: Operator,
        lhs: Box<Exp>,
        rhs: Box<Exp>,
        pos: Position,
    },
}

/// Condition of an `if` or `while`.
///
/// Kept apart from [`Exp`] so a condition can never stand where a number is
/// expected and the other way around.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExp {
    Or {
        lhs: Box<BoolExp>,
        rhs: Box<BoolExp>,
        pos: Position,
    },
    And {
        lhs: Box<BoolExp>,
        rhs: Box<BoolExp>,
        pos: Position,
    },
    Not {
        value: Box<BoolExp>,
        pos: Position,
    },
    Compare {
        op: Operator,
        lhs: Exp,
        rhs: Exp,
        pos: Position,
    },
}

impl Exp {
    pub fn var(name: impl Into<Identifier>, pos: Position) -> Self {
        Self::Var {
            name: name.into(),
            pos,
        }
    }

    pub fn int(value: i64, pos: Position) -> Self {
        Self::Int { value, pos }
    }

    pub fn float(value: f64, pos: Position) -> Self {
        Self::Float { value, pos }
    }

    pub fn arithmetic(op: Operator, lhs: Exp, rhs: Exp, pos: Position) -> Self {
        Self::Arithmetic {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            pos,
        }
    }
}

impl BoolExp {
    pub fn or(lhs: BoolExp, rhs: BoolExp, pos: Position) -> Self {
        Self::Or {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            pos,
        }
    }

    pub fn and(lhs: BoolExp, rhs: BoolExp, pos: Position) -> Self {
        Self::And {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            pos,
        }
    }

    pub fn not(value: BoolExp, pos: Position) -> Self {
        Self::Not {
            value: Box::new(value),
            pos,
        }
    }

    pub fn compare(op: Operator, lhs: Exp, rhs: Exp, pos: Position) -> Self {
        Self::Compare { op, lhs, rhs, pos }
    }
}
