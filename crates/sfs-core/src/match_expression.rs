//! Match expressions: search criteria over user (or room) variables.
//!
//! An expression is a chain of clauses such as
//! `(age > 29) AND (country == Italy)`. Chains are evaluated left to
//! right by the server; there is no grouping.
//!
//! On the wire an expression becomes an `SfsArray` holding one nested
//! array per clause:
//!
//! ```text
//! [ logic_op | null, var_name, condition_type, condition_symbol, value ]
//! ```
//!
//! `logic_op` is `null` for the first clause and `"AND"` / `"OR"` for
//! the following ones.

use std::fmt;
use std::str::FromStr;

use crate::condition::{BoolMatch, LogicOperator, MatchCondition, NumberMatch, StringMatch};
use crate::object::SfsArray;
use crate::value::SfsValue;

/// Operator plus compared value. The value type always matches the
/// operator family.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Bool(BoolMatch, bool),
    Number(NumberMatch, f64),
    String(StringMatch, String),
}

/// One `variable <operator> value` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    var_name: String,
    predicate: Predicate,
}

impl Clause {
    pub fn boolean(var_name: impl Into<String>, condition: BoolMatch, value: bool) -> Self {
        Clause {
            var_name: var_name.into(),
            predicate: Predicate::Bool(condition, value),
        }
    }

    pub fn number(var_name: impl Into<String>, condition: NumberMatch, value: impl Into<f64>) -> Self {
        Clause {
            var_name: var_name.into(),
            predicate: Predicate::Number(condition, value.into()),
        }
    }

    pub fn string(
        var_name: impl Into<String>,
        condition: StringMatch,
        value: impl Into<String>,
    ) -> Self {
        Clause {
            var_name: var_name.into(),
            predicate: Predicate::String(condition, value.into()),
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    pub fn condition(&self) -> MatchCondition {
        match self.predicate {
            Predicate::Bool(c, _) => MatchCondition::Bool(c),
            Predicate::Number(c, _) => MatchCondition::Number(c),
            Predicate::String(c, _) => MatchCondition::String(c),
        }
    }

    /// Compared value, typed the way it is sent.
    pub fn value(&self) -> SfsValue {
        match &self.predicate {
            Predicate::Bool(_, v) => SfsValue::Bool(*v),
            Predicate::Number(_, v) => SfsValue::Double(*v),
            Predicate::String(_, v) => SfsValue::UtfString(v.clone()),
        }
    }

    fn to_sfs_array(&self, logic_op: Option<LogicOperator>) -> SfsArray {
        let condition = self.condition();
        let mut arr = SfsArray::new();

        match logic_op {
            Some(op) => arr.add_utf_string(op.id()),
            None => arr.add_null(),
        }
        arr.add_utf_string(self.var_name.clone());
        arr.add_byte(condition.type_id());
        arr.add_utf_string(condition.symbol());
        arr.add(self.value());

        arr
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.var_name, self.condition().symbol(), self.value())
    }
}

/// Error returned when a textual clause cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClauseParseError {
    #[error("expected `<variable> <operator> <value>`, got {0:?}")]
    Malformed(String),

    #[error("operator {op:?} cannot be applied to value {value:?}")]
    IncompatibleOperator { op: String, value: String },
}

impl FromStr for Clause {
    type Err = ClauseParseError;

    /// Parse `"age > 29"`, `"name startsWith Ma"` or `"isBot == false"`.
    ///
    /// `true` / `false` with `==` / `!=` is a boolean clause, a value that
    /// parses as a number with a numeric operator is a number clause, and
    /// anything else is a string clause (surrounding double quotes are
    /// stripped).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClauseParseError::Malformed(s.to_string());

        let trimmed = s.trim();
        let (var_name, rest) = trimmed.split_once(char::is_whitespace).ok_or_else(malformed)?;
        let (op, raw_value) = rest
            .trim_start()
            .split_once(char::is_whitespace)
            .ok_or_else(malformed)?;
        let raw_value = raw_value.trim();
        if raw_value.is_empty() {
            return Err(malformed());
        }

        let bool_op = match op {
            "==" => Some(BoolMatch::Equals),
            "!=" => Some(BoolMatch::NotEquals),
            _ => None,
        };
        if let (Some(cond), Ok(b)) = (bool_op, raw_value.parse::<bool>()) {
            return Ok(Clause::boolean(var_name, cond, b));
        }

        if let (Some(cond), Ok(n)) = (NumberMatch::from_symbol(op), raw_value.parse::<f64>()) {
            return Ok(Clause::number(var_name, cond, n));
        }

        let unquoted = raw_value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(raw_value);

        match StringMatch::from_symbol(op) {
            Some(cond) => Ok(Clause::string(var_name, cond, unquoted)),
            None => Err(ClauseParseError::IncompatibleOperator {
                op: op.to_string(),
                value: raw_value.to_string(),
            }),
        }
    }
}

/// Left-to-right chain of clauses joined by `AND` / `OR`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpression {
    first: Clause,
    rest: Vec<(LogicOperator, Clause)>,
}

impl MatchExpression {
    pub fn new(first: Clause) -> Self {
        MatchExpression {
            first,
            rest: Vec::new(),
        }
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.rest.push((LogicOperator::And, clause));
        self
    }

    pub fn or(mut self, clause: Clause) -> Self {
        self.rest.push((LogicOperator::Or, clause));
        self
    }

    /// Number of clauses in the chain (always at least one).
    pub fn clause_count(&self) -> usize {
        1 + self.rest.len()
    }

    /// Clauses in chain order, each with the connective that precedes it.
    pub fn clauses(&self) -> impl Iterator<Item = (Option<LogicOperator>, &Clause)> {
        std::iter::once((None, &self.first))
            .chain(self.rest.iter().map(|(op, c)| (Some(*op), c)))
    }

    /// Structured-array form sent to the server.
    pub fn to_sfs_array(&self) -> SfsArray {
        self.clauses()
            .map(|(op, clause)| SfsValue::Array(clause.to_sfs_array(op)))
            .collect()
    }
}

impl From<Clause> for MatchExpression {
    fn from(clause: Clause) -> Self {
        MatchExpression::new(clause)
    }
}

impl fmt::Display for MatchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, clause) in &self.rest {
            write!(f, " {} {}", op, clause)?;
        }
        Ok(())
    }
}
