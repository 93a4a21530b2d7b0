//! sfs-core
//!
//! Logical model for the SmartFoxServer client binding:
//! - typed values, objects and arrays
//! - match expressions (search criteria)
//! - search scope
//! - the `Request` trait and the `FindUsers` request
//! - validation errors and the injected warning sink

pub mod value;
pub mod object;
pub mod condition;
pub mod match_expression;
pub mod scope;
pub mod logger;
pub mod error;
pub mod request;
pub mod find_users;

pub use value::SfsValue;
pub use object::{SfsArray, SfsObject};

pub use condition::{BoolMatch, LogicOperator, MatchCondition, NumberMatch, StringMatch};
pub use match_expression::{Clause, ClauseParseError, MatchExpression};

pub use scope::SearchScope;
pub use logger::{Logger, TracingLogger};
pub use error::ValidationError;
pub use request::{Controller, InboundMessage, Request, RequestMessage, RequestType};
pub use find_users::FindUsersRequest;
