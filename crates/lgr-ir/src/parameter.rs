//! Gate parameters.
//!
//! Routing never evaluates parameters; it only carries them along when an
//! operation is moved to another wire. Symbolic parameters (ansatz angles)
//! therefore survive routing unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;

/// A concrete or symbolic gate angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A numeric value.
    Constant(f64),
    /// A free symbol, e.g. `al_3`.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Sum of two expressions.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Product of two expressions.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Create a symbolic parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Create the constant π.
    pub fn pi() -> Self {
        Self::Pi
    }

    /// Whether the expression still contains a free symbol.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Self::Symbol(_) => true,
            Self::Constant(_) | Self::Pi => false,
            Self::Neg(e) => e.is_symbolic(),
            Self::Add(a, b) | Self::Mul(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Evaluate the expression, or `None` if it is symbolic.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Constant(v) => Some(*v),
            Self::Pi => Some(PI),
            Self::Symbol(_) => None,
            Self::Neg(e) => e.as_f64().map(|v| -v),
            Self::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            Self::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
        }
    }

    /// All free symbols, in sorted order.
    pub fn symbols(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Self::Symbol(name) => {
                    out.insert(name.as_str());
                }
                Self::Constant(_) | Self::Pi => {}
                Self::Neg(e) => stack.push(e),
                Self::Add(a, b) | Self::Mul(a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
            }
        }
        out
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{v}"),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::Pi => write!(f, "π"),
            Self::Neg(e) => write!(f, "-({e})"),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Mul(a, b) => write!(f, "({a} * {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::Neg(Box::new(self))
    }
}
