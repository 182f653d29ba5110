//! QUAD code generation.
//!
//! A single walk over the AST that type checks as it goes and emits
//! [`Quad`]s with symbolic labels. All state of one run lives in a
//! [`Context`]; nothing is shared between runs.

mod codegen_error;
mod labels;
mod quad;

#[cfg(test)]
mod labels_tests;

pub use codegen_error::{CodegenError, InnerCodegenError};
pub use labels::finalize;
pub use quad::{Label, Operand, Quad, QuadOp, QuadType, Quads, Temp};

use crate::ast::*;
use crate::lexer::Position;
use std::collections::HashMap;

struct NameGenerator {
    temp_count: u64,
    label_count: u64,
}

impl NameGenerator {
    fn new() -> Self {
        Self {
            temp_count: 0,
            label_count: 0,
        }
    }

    fn get_temp(&mut self) -> Temp {
        self.temp_count += 1;
        Temp(self.temp_count)
    }

    fn get_label(&mut self) -> Label {
        self.label_count += 1;
        Label(self.label_count)
    }
}

/// Typed result of an expression.
#[derive(Debug, Clone)]
struct Value {
    operand: Operand,
    ty: DataType,
}

impl Value {
    fn new(operand: impl Into<Operand>, ty: DataType) -> Self {
        Self {
            operand: operand.into(),
            ty,
        }
    }
}

struct Context {
    symbols: HashMap<Identifier, DataType>,
    ng: NameGenerator,
    /// Targets of `break`, innermost last.
    breaks: Vec<Label>,
    quads: Quads,
    errors: Vec<CodegenError>,
}

impl Context {
    fn new() -> Self {
        Self {
            symbols: HashMap::new(),
            ng: NameGenerator::new(),
            breaks: Vec::new(),
            quads: Quads::new(),
            errors: Vec::new(),
        }
    }

    fn push(&mut self, quad: Quad) {
        tracing::trace!(%quad, "emit");
        self.quads.push(quad);
    }

    fn error(&mut self, inner: InnerCodegenError, pos: Position) {
        self.errors.push(inner.at(pos));
    }

    /// Type of a declared variable; reports it as undefined otherwise.
    fn lookup(&mut self, name: &Identifier, pos: Position) -> Option<DataType> {
        let ty = self.symbols.get(name).copied();
        if ty.is_none() {
            self.error(InnerCodegenError::UndefinedVariable(name.clone()), pos);
        }
        ty
    }

    fn declare(&mut self, declaration: &Declaration) {
        for name in &declaration.names {
            if self.symbols.contains_key(name) {
                let err = InnerCodegenError::AlreadyDefined(name.clone());
                self.error(err, declaration.pos);
                continue;
            }
            self.symbols.insert(name.clone(), declaration.data_type);
        }
    }

    /// Converts `value` to `target` through a new temporary, if it is not
    /// already of that type.
    fn cast(&mut self, value: Value, target: DataType) -> Value {
        if value.ty == target || target == DataType::Unknown {
            return value;
        }

        let dst = self.ng.get_temp();
        let src = value.operand;
        if target.is_integer() {
            self.push(Quad::RealToInt { dst, src });
        } else {
            self.push(Quad::IntToReal { dst, src });
        }
        Value::new(dst, target)
    }

    /// Widens both operands to real if `ty` is real.
    fn widen(&mut self, lhs: Value, rhs: Value, ty: QuadType) -> (Operand, Operand) {
        match ty {
            QuadType::Int => (lhs.operand, rhs.operand),
            QuadType::Real => {
                let lhs = self.cast(lhs, DataType::Float);
                let rhs = self.cast(rhs, DataType::Float);
                (lhs.operand, rhs.operand)
            }
        }
    }
}

/// Generates QUAD for `program`, labels still symbolic.
pub fn generate_quads(program: &Program) -> (Quads, Vec<CodegenError>) {
    let mut ctx = Context::new();
    for declaration in &program.declarations {
        ctx.declare(declaration);
    }

    emit_block(&program.body.statements, &mut ctx);
    ctx.push(Quad::Halt);

    tracing::debug!(
        quads = ctx.quads.len(),
        temps = ctx.ng.temp_count,
        labels = ctx.ng.label_count,
        errors = ctx.errors.len(),
        "code generated"
    );
    (ctx.quads, ctx.errors)
}

/// Generates labelled QUAD text for `program`, one instruction per line.
pub fn generate(program: &Program) -> (String, Vec<CodegenError>) {
    let (quads, errors) = generate_quads(program);
    let text = quads.iter().map(|quad| format!("{quad}\n")).collect();
    (text, errors)
}

fn emit_block(statements: &[Statement], ctx: &mut Context) {
    for statement in statements {
        emit_statement(statement, ctx);
    }
}

fn emit_statement(statement: &Statement, ctx: &mut Context) {
    match statement {
        Statement::Assignment(assignment) => emit_assignment(assignment, ctx),
        Statement::Input(input) => emit_input(input, ctx),
        Statement::Output(output) => emit_output(output, ctx),
        Statement::If(stmt) => emit_if(stmt, ctx),
        Statement::While(stmt) => emit_while(stmt, ctx),
        Statement::Switch(stmt) => emit_switch(stmt, ctx),
        Statement::Break(pos) => emit_break(*pos, ctx),
        Statement::Block(block) => emit_block(&block.statements, ctx),
    }
}

fn emit_assignment(assignment: &Assignment, ctx: &mut Context) {
    let Assignment {
        variable,
        value,
        cast_type,
        pos,
    } = assignment;

    let value = value.as_ref().and_then(|exp| emit_exp(exp, ctx));
    let Some(var_type) = ctx.lookup(variable, *pos) else {
        return;
    };
    let Some(mut value) = value else {
        return;
    };

    if *cast_type != DataType::Unknown && *cast_type != value.ty {
        value = ctx.cast(value, *cast_type);
    }

    match (var_type, value.ty) {
        (DataType::Integer, DataType::Float) => {
            ctx.error(InnerCodegenError::FloatToInt(variable.clone()), *pos);
            return;
        }
        (DataType::Float, DataType::Integer) => value = ctx.cast(value, DataType::Float),
        _ => (),
    }

    // a variable from a malformed declaration has no instruction type
    if let Ok(ty) = QuadType::try_from(var_type) {
        ctx.push(Quad::Asn {
            ty,
            dst: variable.clone(),
            src: value.operand,
        });
    }
}

fn emit_input(input: &Input, ctx: &mut Context) {
    let Some(variable) = &input.variable else {
        return;
    };
    let Some(var_type) = ctx.lookup(variable, input.pos) else {
        return;
    };
    if let Ok(ty) = QuadType::try_from(var_type) {
        let dst = variable.clone();
        ctx.push(Quad::Inp { ty, dst });
    }
}

fn emit_output(output: &Output, ctx: &mut Context) {
    let Some(value) = output.value.as_ref().and_then(|exp| emit_exp(exp, ctx)) else {
        return;
    };
    if let Ok(ty) = QuadType::try_from(value.ty) {
        let src = value.operand;
        ctx.push(Quad::Prt { ty, src });
    }
}

fn emit_if(stmt: &If, ctx: &mut Context) {
    let condition = stmt.condition.as_ref().and_then(|c| emit_condition(c, ctx));
    let end = ctx.ng.get_label();
    let els = stmt.els.as_ref().map(|els| (ctx.ng.get_label(), els));

    let target = els.map_or(end, |(label, _)| label);
    if let Some(cond) = condition {
        ctx.push(Quad::JumpIfZero { target, cond });
    }

    if let Some(then) = &stmt.then {
        emit_statement(then, ctx);
    }

    if let Some((label, els)) = els {
        ctx.push(Quad::Jump(end));
        ctx.push(Quad::Label(label));
        emit_statement(els, ctx);
    }

    ctx.push(Quad::Label(end));
}

fn emit_while(stmt: &While, ctx: &mut Context) {
    let start = ctx.ng.get_label();
    let end = ctx.ng.get_label();

    ctx.push(Quad::Label(start));
    if let Some(cond) = stmt.condition.as_ref().and_then(|c| emit_condition(c, ctx)) {
        ctx.push(Quad::JumpIfZero { target: end, cond });
    }

    ctx.breaks.push(end);
    if let Some(body) = &stmt.body {
        emit_statement(body, ctx);
    }
    pop_break(end, ctx);

    ctx.push(Quad::Jump(start));
    ctx.push(Quad::Label(end));
}

fn emit_switch(stmt: &Switch, ctx: &mut Context) {
    let Some(selector) = stmt.selector.as_ref().and_then(|exp| emit_exp(exp, ctx)) else {
        return;
    };
    if !selector.ty.is_integer() {
        ctx.error(InnerCodegenError::NonIntegerSwitch, stmt.pos);
    }

    let temp = ctx.ng.get_temp();
    let case_labels: Vec<Label> = stmt
        .cases
        .iter()
        .map(|case| {
            let label = ctx.ng.get_label();
            ctx.push(Quad::Binary {
                ty: QuadType::Int,
                op: QuadOp::Nql,
                dst: temp,
                lhs: selector.operand.clone(),
                rhs: Operand::Int(case.value),
            });
            ctx.push(Quad::JumpIfZero {
                target: label,
                cond: temp,
            });
            label
        })
        .collect();

    let default = ctx.ng.get_label();
    let end = ctx.ng.get_label();
    ctx.push(Quad::Jump(default));

    // no implicit break: each case falls through into the next
    ctx.breaks.push(end);
    for (label, case) in case_labels.into_iter().zip(&stmt.cases) {
        ctx.push(Quad::Label(label));
        emit_block(&case.body, ctx);
    }
    ctx.push(Quad::Label(default));
    emit_block(&stmt.default, ctx);
    pop_break(end, ctx);

    ctx.push(Quad::Label(end));
}

fn emit_break(pos: Position, ctx: &mut Context) {
    match ctx.breaks.last().copied() {
        Some(target) => ctx.push(Quad::Jump(target)),
        None => ctx.error(InnerCodegenError::BreakOutsideLoop, pos),
    }
}

fn pop_break(label: Label, ctx: &mut Context) {
    if ctx.breaks.last() == Some(&label) {
        ctx.breaks.pop();
    }
}

fn emit_exp(exp: &Exp, ctx: &mut Context) -> Option<Value> {
    match exp {
        Exp::Var { name, pos } => {
            let ty = ctx.lookup(name, *pos)?;
            Some(Value::new(Operand::Var(name.clone()), ty))
        }
        Exp::Int { value, .. } => Some(Value::new(Operand::Int(*value), DataType::Integer)),
        Exp::Float { value, .. } => Some(Value::new(Operand::Float(*value), DataType::Float)),
        Exp::Arithmetic { op, lhs, rhs, .. } => {
            let lhs = emit_exp(lhs, ctx);
            let rhs = emit_exp(rhs, ctx);
            let (lhs, rhs) = lhs.zip(rhs)?;
            let op = QuadOp::try_from(*op).ok()?;

            let ty = QuadType::promote(lhs.ty, rhs.ty);
            let dst = ctx.ng.get_temp();
            let (lhs, rhs) = ctx.widen(lhs, rhs, ty);
            ctx.push(Quad::Binary {
                ty,
                op,
                dst,
                lhs,
                rhs,
            });
            Some(Value::new(dst, ty.data_type()))
        }
    }
}

/// Generates a boolean expression into a temporary holding 0 or 1.
fn emit_condition(exp: &BoolExp, ctx: &mut Context) -> Option<Temp> {
    match exp {
        BoolExp::Or { lhs, rhs, .. } => {
            let lhs = emit_condition(lhs, ctx);
            let rhs = emit_condition(rhs, ctx);
            let (lhs, rhs) = lhs.zip(rhs)?;

            // the sum is 2 when both hold, clamp it back to 1
            let dst = ctx.ng.get_temp();
            ctx.push(int_binary(QuadOp::Add, dst, lhs.into(), rhs.into()));
            ctx.push(int_binary(QuadOp::Grt, dst, dst.into(), Operand::Int(0)));
            Some(dst)
        }
        BoolExp::And { lhs, rhs, .. } => {
            let lhs = emit_condition(lhs, ctx);
            let rhs = emit_condition(rhs, ctx);
            let (lhs, rhs) = lhs.zip(rhs)?;

            let dst = ctx.ng.get_temp();
            ctx.push(int_binary(QuadOp::Mlt, dst, lhs.into(), rhs.into()));
            Some(dst)
        }
        BoolExp::Not { value, .. } => {
            let value = emit_condition(value, ctx)?;
            let dst = ctx.ng.get_temp();
            ctx.push(int_binary(QuadOp::Sub, dst, Operand::Int(1), value.into()));
            Some(dst)
        }
        BoolExp::Compare {
            op: op @ (Operator::GreaterThanOrEqualTo | Operator::LessThanOrEqualTo),
            lhs,
            rhs,
            pos,
        } => {
            let strict = if *op == Operator::GreaterThanOrEqualTo {
                Operator::GreaterThan
            } else {
                Operator::LessThan
            };
            let split = BoolExp::or(
                BoolExp::compare(Operator::EqualTo, lhs.clone(), rhs.clone(), *pos),
                BoolExp::compare(strict, lhs.clone(), rhs.clone(), *pos),
                *pos,
            );
            emit_condition(&split, ctx)
        }
        BoolExp::Compare { op, lhs, rhs, .. } => {
            let lhs = emit_exp(lhs, ctx);
            let rhs = emit_exp(rhs, ctx);
            let (lhs, rhs) = lhs.zip(rhs)?;
            let op = QuadOp::try_from(*op).ok()?;

            let ty = QuadType::promote(lhs.ty, rhs.ty);
            let (lhs, rhs) = ctx.widen(lhs, rhs, ty);
            let dst = ctx.ng.get_temp();
            ctx.push(Quad::Binary {
                ty,
                op,
                dst,
                lhs,
                rhs,
            });
            Some(dst)
        }
    }
}

fn int_binary(op: QuadOp, dst: Temp, lhs: Operand, rhs: Operand) -> Quad {
    Quad::Binary {
        ty: QuadType::Int,
        op,
        dst,
        lhs,
        rhs,
    }
}
