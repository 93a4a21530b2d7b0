//! Comparison operators and logic connectives used by match expressions.
//!
//! Each family carries a type id that tells the server how to read the
//! compared value:
//!
//! | family        | type id | value   |
//! |---------------|---------|---------|
//! | `BoolMatch`   | 0       | bool    |
//! | `NumberMatch` | 1       | double  |
//! | `StringMatch` | 2       | string  |

use std::fmt;

/// Operators on boolean variables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoolMatch {
    Equals,
    NotEquals,
}

impl BoolMatch {
    pub fn symbol(self) -> &'static str {
        match self {
            BoolMatch::Equals => "==",
            BoolMatch::NotEquals => "!=",
        }
    }
}

/// Operators on numeric variables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NumberMatch {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
}

impl NumberMatch {
    pub fn symbol(self) -> &'static str {
        match self {
            NumberMatch::Equals => "==",
            NumberMatch::NotEquals => "!=",
            NumberMatch::GreaterThan => ">",
            NumberMatch::GreaterThanOrEqualTo => ">=",
            NumberMatch::LessThan => "<",
            NumberMatch::LessThanOrEqualTo => "<=",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "==" => Some(NumberMatch::Equals),
            "!=" => Some(NumberMatch::NotEquals),
            ">" => Some(NumberMatch::GreaterThan),
            ">=" => Some(NumberMatch::GreaterThanOrEqualTo),
            "<" => Some(NumberMatch::LessThan),
            "<=" => Some(NumberMatch::LessThanOrEqualTo),
            _ => None,
        }
    }
}

/// Operators on string variables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StringMatch {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    EndsWith,
}

impl StringMatch {
    pub fn symbol(self) -> &'static str {
        match self {
            StringMatch::Equals => "==",
            StringMatch::NotEquals => "!=",
            StringMatch::Contains => "contains",
            StringMatch::StartsWith => "startsWith",
            StringMatch::EndsWith => "endsWith",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "==" => Some(StringMatch::Equals),
            "!=" => Some(StringMatch::NotEquals),
            "contains" => Some(StringMatch::Contains),
            "startsWith" => Some(StringMatch::StartsWith),
            "endsWith" => Some(StringMatch::EndsWith),
            _ => None,
        }
    }
}

/// Any operator, tagged with its family.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchCondition {
    Bool(BoolMatch),
    Number(NumberMatch),
    String(StringMatch),
}

impl MatchCondition {
    /// Family type id sent alongside the operator symbol.
    pub fn type_id(self) -> i8 {
        match self {
            MatchCondition::Bool(_) => 0,
            MatchCondition::Number(_) => 1,
            MatchCondition::String(_) => 2,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MatchCondition::Bool(c) => c.symbol(),
            MatchCondition::Number(c) => c.symbol(),
            MatchCondition::String(c) => c.symbol(),
        }
    }
}

/// Connective placed in front of every clause but the first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicOperator {
    And,
    Or,
}

impl LogicOperator {
    pub fn id(self) -> &'static str {
        match self {
            LogicOperator::And => "AND",
            LogicOperator::Or => "OR",
        }
    }
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
