//! # Arithmetic and Logical Evaluator
//!
//! Operators are strictly typed: arithmetic takes numbers only, logic takes
//! booleans only. There is no implicit casting. A result that would be NaN or
//! infinite is an error, never a value.

use std::fmt;
use std::str::FromStr;

use crate::compare;
use crate::model::{Number, TypeWeight, Value};
use crate::{Error, Result};

// ============================================================================
// Operand checks
// ============================================================================

fn number_operand(operator: &'static str, v: &Value) -> Result<f64> {
    match v {
        Value::Number(n) => Ok(n.get()),
        other => Err(Error::InvalidOperandType {
            operator,
            expected: TypeWeight::Number,
            got: other.type_weight(),
        }),
    }
}

fn bool_operand(operator: &'static str, v: &Value) -> Result<bool> {
    match v {
        Value::Bool(b) => Ok(*b),
        other => Err(Error::InvalidOperandType {
            operator,
            expected: TypeWeight::Bool,
            got: other.type_weight(),
        }),
    }
}

fn in_range(operator: &'static str, result: f64) -> Result<Value> {
    Number::new(result)
        .map(Value::Number)
        .ok_or(Error::NumericOutOfRange { operator })
}

fn arithmetic(
    operator: &'static str,
    lhs: &Value,
    rhs: &Value,
    op: impl FnOnce(f64, f64) -> f64,
) -> Result<Value> {
    let l = number_operand(operator, lhs)?;
    let r = number_operand(operator, rhs)?;
    in_range(operator, op(l, r))
}

// ============================================================================
// Arithmetic
// ============================================================================

pub fn unary_plus(v: &Value) -> Result<Value> {
    let n = number_operand("unary +", v)?;
    in_range("unary +", n)
}

pub fn unary_minus(v: &Value) -> Result<Value> {
    let n = number_operand("unary -", v)?;
    in_range("unary -", -n)
}

pub fn add(lhs: &Value, rhs: &Value) -> Result<Value> {
    arithmetic("+", lhs, rhs, |l, r| l + r)
}

pub fn subtract(lhs: &Value, rhs: &Value) -> Result<Value> {
    arithmetic("-", lhs, rhs, |l, r| l - r)
}

pub fn multiply(lhs: &Value, rhs: &Value) -> Result<Value> {
    arithmetic("*", lhs, rhs, |l, r| l * r)
}

/// Fails with `DivisionByZero` on a zero divisor, before dividing.
pub fn divide(lhs: &Value, rhs: &Value) -> Result<Value> {
    let l = number_operand("/", lhs)?;
    let r = number_operand("/", rhs)?;
    if r == 0.0 {
        return Err(Error::DivisionByZero { operator: "/" });
    }
    in_range("/", l / r)
}

/// Truncated remainder; the result takes the sign of the dividend.
pub fn modulus(lhs: &Value, rhs: &Value) -> Result<Value> {
    let l = number_operand("%", lhs)?;
    let r = number_operand("%", rhs)?;
    if r == 0.0 {
        return Err(Error::DivisionByZero { operator: "%" });
    }
    in_range("%", l % r)
}

// ============================================================================
// Logic
// ============================================================================

/// Both operands are type-checked before the short circuit applies, so a
/// non-boolean right side is reported even when the left side is `false`.
pub fn logical_and(lhs: &Value, rhs: &Value) -> Result<Value> {
    let l = bool_operand("&&", lhs)?;
    let r = bool_operand("&&", rhs)?;
    Ok(Value::Bool(l && r))
}

pub fn logical_or(lhs: &Value, rhs: &Value) -> Result<Value> {
    let l = bool_operand("||", lhs)?;
    let r = bool_operand("||", rhs)?;
    Ok(Value::Bool(l || r))
}

pub fn logical_not(v: &Value) -> Result<Value> {
    Ok(Value::Bool(!bool_operand("!", v)?))
}

/// `condition ? true_part : false_part`.
pub fn ternary<'a>(condition: &Value, true_part: &'a Value, false_part: &'a Value) -> Result<&'a Value> {
    if bool_operand("?:", condition)? {
        Ok(true_part)
    } else {
        Ok(false_part)
    }
}

// ============================================================================
// Operator dispatch
// ============================================================================

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add, Sub, Mul, Div, Mod,
    // Logical
    And, Or,
    // Relational
    Eq, Neq, Lt, Lte, Gt, Gte, In,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::In => "in",
        }
    }

    /// Relational operators never fail, except `in` on a non-list.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Neq | BinaryOp::Lt | BinaryOp::Lte | BinaryOp::Gt | BinaryOp::Gte | BinaryOp::In
        )
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnaryOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(UnaryOp::Plus),
            "-" => Ok(UnaryOp::Minus),
            "!" => Ok(UnaryOp::Not),
            other => Err(Error::UnknownOperator(other.to_owned())),
        }
    }
}

impl FromStr for BinaryOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::Neq,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Lte,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Gte,
            s if s.eq_ignore_ascii_case("in") => BinaryOp::In,
            other => return Err(Error::UnknownOperator(other.to_owned())),
        })
    }
}

pub fn evaluate_unary(op: UnaryOp, v: &Value) -> Result<Value> {
    match op {
        UnaryOp::Plus => unary_plus(v),
        UnaryOp::Minus => unary_minus(v),
        UnaryOp::Not => logical_not(v),
    }
}

pub fn evaluate_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    match op {
        BinaryOp::Add => add(lhs, rhs),
        BinaryOp::Sub => subtract(lhs, rhs),
        BinaryOp::Mul => multiply(lhs, rhs),
        BinaryOp::Div => divide(lhs, rhs),
        BinaryOp::Mod => modulus(lhs, rhs),
        BinaryOp::And => logical_and(lhs, rhs),
        BinaryOp::Or => logical_or(lhs, rhs),
        BinaryOp::Eq => Ok(Value::Bool(compare::equal(lhs, rhs))),
        BinaryOp::Neq => Ok(Value::Bool(compare::unequal(lhs, rhs))),
        BinaryOp::Lt => Ok(Value::Bool(compare::less(lhs, rhs))),
        BinaryOp::Lte => Ok(Value::Bool(compare::less_or_equal(lhs, rhs))),
        BinaryOp::Gt => Ok(Value::Bool(compare::greater(lhs, rhs))),
        BinaryOp::Gte => Ok(Value::Bool(compare::greater_or_equal(lhs, rhs))),
        BinaryOp::In => compare::in_list(lhs, rhs).map(Value::Bool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Value {
        Value::from(v)
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(add(&num(1.0), &num(2.5)).unwrap(), num(3.5));
        assert_eq!(subtract(&num(1.0), &num(2.5)).unwrap(), num(-1.5));
        assert_eq!(multiply(&num(3.0), &num(4.0)).unwrap(), num(12.0));
        assert_eq!(divide(&num(1.0), &num(4.0)).unwrap(), num(0.25));
        assert_eq!(modulus(&num(-7.0), &num(3.0)).unwrap(), num(-1.0));
        assert_eq!(unary_minus(&num(2.0)).unwrap(), num(-2.0));
        assert_eq!(unary_plus(&num(2.0)).unwrap(), num(2.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(divide(&num(1.0), &num(0.0)), Err(Error::DivisionByZero { .. })));
        assert!(matches!(divide(&num(0.0), &num(-0.0)), Err(Error::DivisionByZero { .. })));
        assert!(matches!(modulus(&num(5.0), &num(0.0)), Err(Error::DivisionByZero { .. })));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            add(&num(f64::MAX), &num(f64::MAX)),
            Err(Error::NumericOutOfRange { operator: "+" })
        ));
        assert!(matches!(
            multiply(&num(f64::MAX), &num(-2.0)),
            Err(Error::NumericOutOfRange { .. })
        ));
        assert!(matches!(
            divide(&num(f64::MAX), &num(0.1)),
            Err(Error::NumericOutOfRange { .. })
        ));
    }

    #[test]
    fn test_no_implicit_casts() {
        for bad in [Value::Null, Value::from(true), Value::from("1"), Value::List(vec![])] {
            assert!(matches!(
                add(&bad, &num(1.0)),
                Err(Error::InvalidOperandType { expected: TypeWeight::Number, .. })
            ));
            assert!(matches!(unary_minus(&bad), Err(Error::InvalidOperandType { .. })));
        }
        // NaN was normalized to null at construction.
        assert!(matches!(
            add(&num(f64::NAN), &num(1.0)),
            Err(Error::InvalidOperandType { got: TypeWeight::Null, .. })
        ));
    }

    #[test]
    fn test_logic_checks_both_operands() {
        let t = Value::from(true);
        let f = Value::from(false);
        assert_eq!(logical_and(&t, &f).unwrap(), f);
        assert_eq!(logical_or(&f, &t).unwrap(), t);
        assert_eq!(logical_not(&f).unwrap(), t);

        // short-circuit would skip the right side, but its type is still checked
        assert!(matches!(
            logical_and(&f, &num(1.0)),
            Err(Error::InvalidOperandType { expected: TypeWeight::Bool, .. })
        ));
        assert!(logical_or(&t, &Value::Null).is_err());
        assert!(logical_not(&num(0.0)).is_err());
    }

    #[test]
    fn test_ternary() {
        let a = Value::from("a");
        let b = Value::from("b");
        assert_eq!(ternary(&Value::from(true), &a, &b).unwrap(), &a);
        assert_eq!(ternary(&Value::from(false), &a, &b).unwrap(), &b);
        assert!(ternary(&Value::from(1), &a, &b).is_err());
    }

    #[test]
    fn test_dispatch() {
        let op: BinaryOp = ">=".parse().unwrap();
        assert_eq!(op, BinaryOp::Gte);
        assert_eq!(
            evaluate_binary(op, &Value::List(vec![]), &Value::List(vec![])).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            evaluate_binary("IN".parse().unwrap(), &num(1.0), &Value::from(vec![1])).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(evaluate_unary("-".parse().unwrap(), &num(1.0)).unwrap(), num(-1.0));
        assert!(matches!("**".parse::<BinaryOp>(), Err(Error::UnknownOperator(_))));
        assert!(BinaryOp::In.is_relational());
        assert!(!BinaryOp::Add.is_relational());
    }
}
