//! The fixed operator catalog and the angle-mode transform.
//!
//! Operators never touch calculator state themselves. Each one resolves to an
//! [`Operation`], which the engine applies through a single entry point so the
//! latch handling is identical for every operator.

use std::f64::consts;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether trig functions take and return degrees or radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn from_degrees_flag(degrees: bool) -> Self {
        if degrees { Self::Degrees } else { Self::Radians }
    }

    pub fn is_degrees(self) -> bool {
        self == Self::Degrees
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Radians => Self::Degrees,
            Self::Degrees => Self::Radians,
        }
    }

    /// Convert a forward trig operand into radians.
    pub fn to_radians(self, x: f64) -> f64 {
        match self {
            Self::Degrees => x * consts::PI / 180.0,
            Self::Radians => x,
        }
    }

    /// Convert an inverse trig result out of radians.
    pub fn from_radians(self, x: f64) -> f64 {
        match self {
            Self::Degrees => x * 180.0 / consts::PI,
            Self::Radians => x,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Radians => "Rad",
            Self::Degrees => "Deg",
        }
    }
}

/// A resolved operator, ready to be applied by the engine.
pub enum Operation {
    /// Consumes the buffer and replaces it with the result.
    Unary(Box<dyn Fn(f64) -> f64>),
    /// Pops the stack top as the left operand; the buffer is the right operand.
    Binary(Box<dyn Fn(f64, f64) -> f64>),
}

impl Operation {
    pub fn unary(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::Unary(Box::new(f))
    }

    pub fn binary(f: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        Self::Binary(Box::new(f))
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary(_) => write!(f, "Operation::Unary"),
            Self::Binary(_) => write!(f, "Operation::Binary"),
        }
    }
}

/// Every operator the keypad offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Percent,
    Reciprocal,
    Square,
    SquareRoot,
    Floor,
    Ceiling,
    Log10,
    Ln,
    InvertSign,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Asin,
    Acos,
    Atan,
    Asinh,
    Acosh,
    Atanh,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    NthRoot,
    Modulus,
}

impl Operator {
    pub const ALL: [Operator; 28] = [
        Self::Percent,
        Self::Reciprocal,
        Self::Square,
        Self::SquareRoot,
        Self::Floor,
        Self::Ceiling,
        Self::Log10,
        Self::Ln,
        Self::InvertSign,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Asinh,
        Self::Acosh,
        Self::Atanh,
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::NthRoot,
        Self::Modulus,
    ];

    /// Resolve this operator into an operation under the given angle mode.
    ///
    /// Only the trig family looks at `angle`: forward functions convert their
    /// operand into radians, inverse functions convert their result back.
    pub fn operation(self, angle: AngleMode) -> Operation {
        let forward = move |f: fn(f64) -> f64| Operation::unary(move |x| f(angle.to_radians(x)));
        let inverse = move |f: fn(f64) -> f64| Operation::unary(move |x| angle.from_radians(f(x)));

        match self {
            Self::Percent => Operation::unary(|x| x / 100.0),
            Self::Reciprocal => Operation::unary(|x| 1.0 / x),
            Self::Square => Operation::unary(|x| x * x),
            Self::SquareRoot => Operation::unary(f64::sqrt),
            Self::Floor => Operation::unary(f64::floor),
            Self::Ceiling => Operation::unary(f64::ceil),
            Self::Log10 => Operation::unary(f64::log10),
            Self::Ln => Operation::unary(f64::ln),
            Self::InvertSign => Operation::unary(|x| -x),

            Self::Sin => forward(f64::sin),
            Self::Cos => forward(f64::cos),
            Self::Tan => forward(f64::tan),
            Self::Sinh => forward(f64::sinh),
            Self::Cosh => forward(f64::cosh),
            Self::Tanh => forward(f64::tanh),

            Self::Asin => inverse(f64::asin),
            Self::Acos => inverse(f64::acos),
            Self::Atan => inverse(f64::atan),
            Self::Asinh => inverse(f64::asinh),
            Self::Acosh => inverse(f64::acosh),
            Self::Atanh => inverse(f64::atanh),

            Self::Add => Operation::binary(|a, b| a + b),
            Self::Subtract => Operation::binary(|a, b| a - b),
            Self::Multiply => Operation::binary(|a, b| a * b),
            Self::Divide => Operation::binary(|a, b| a / b),
            Self::Power => Operation::binary(f64::powf),
            Self::NthRoot => Operation::binary(|a, b| a.powf(1.0 / b)),
            Self::Modulus => Operation::binary(|a, b| a % b),
        }
    }

    /// Stable name used by configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Reciprocal => "reciprocal",
            Self::Square => "square",
            Self::SquareRoot => "sqrt",
            Self::Floor => "floor",
            Self::Ceiling => "ceil",
            Self::Log10 => "log10",
            Self::Ln => "ln",
            Self::InvertSign => "invert-sign",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::NthRoot => "nth-root",
            Self::Modulus => "modulus",
        }
    }

    /// Keypad label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Reciprocal => "1/x",
            Self::Square => "x²",
            Self::SquareRoot => "√x",
            Self::Floor => "⌊x⌋",
            Self::Ceiling => "⌈x⌉",
            Self::Log10 => "log₁₀",
            Self::Ln => "ln",
            Self::InvertSign => "±",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asin => "sin⁻¹",
            Self::Acos => "cos⁻¹",
            Self::Atan => "tan⁻¹",
            Self::Asinh => "sinh⁻¹",
            Self::Acosh => "cosh⁻¹",
            Self::Atanh => "tanh⁻¹",
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "xʸ",
            Self::NthRoot => "ʸ√x",
            Self::Modulus => "mod",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown operator '{0}'")]
pub struct ParseOperatorError(pub String);

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ParseOperatorError(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constants that can be inserted into the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => consts::PI,
            Self::E => consts::E,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }
}
