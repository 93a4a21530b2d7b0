//! `FindUsers`: search the zone, a room or a room group for users whose
//! variables match an expression.
//!
//! Params layout:
//!
//! ```text
//! e : sfs_array   match expression (always)
//! r : int         room id          (Room scope only)
//! g : utf_string  group name       (Group scope only)
//! l : short       result limit     (only when > 0)
//! ```
//!
//! The server answers with an event on the same action id carrying the
//! matched users under `fu`.

use crate::error::ValidationError;
use crate::logger::Logger;
use crate::match_expression::MatchExpression;
use crate::object::SfsObject;
use crate::request::{Request, RequestType};
use crate::scope::SearchScope;
use crate::value::SfsValue;

pub const KEY_EXPRESSION: &str = "e";
pub const KEY_GROUP: &str = "g";
pub const KEY_ROOM: &str = "r";
pub const KEY_LIMIT: &str = "l";
/// Key of the user list in the server's answer.
pub const KEY_FILTERED_USERS: &str = "fu";

/// Largest limit the `short` encoding can carry.
pub const MAX_LIMIT: u32 = i16::MAX as u32;

const ERROR_HEADLINE: &str = "FindUsers request error";
const MISSING_EXPRESSION: &str = "Missing Match Expression";

/// Find users matching an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FindUsersRequest {
    expression: Option<MatchExpression>,
    scope: SearchScope,
    /// `0` means no limit.
    limit: u32,
}

impl FindUsersRequest {
    pub fn new(expression: Option<MatchExpression>, scope: SearchScope, limit: u32) -> Self {
        FindUsersRequest {
            expression,
            scope,
            limit,
        }
    }

    /// Zone-wide search without a limit.
    pub fn in_zone(expression: MatchExpression) -> Self {
        Self::new(Some(expression), SearchScope::Zone, 0)
    }

    /// Build from a loosely typed target (see [`SearchScope::from_dynamic`]).
    pub fn from_dynamic(
        expression: Option<MatchExpression>,
        target: &SfsValue,
        limit: u32,
        logger: &dyn Logger,
    ) -> Self {
        Self::new(expression, SearchScope::from_dynamic(target, logger), limit)
    }

    pub fn expression(&self) -> Option<&MatchExpression> {
        self.expression.as_ref()
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Request for FindUsersRequest {
    fn request_type(&self) -> RequestType {
        RequestType::FindUsers
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut failures = Vec::new();

        if self.expression.is_none() {
            failures.push(MISSING_EXPRESSION.to_string());
        }

        if self.limit > MAX_LIMIT {
            failures.push(format!("Limit must not exceed {}", MAX_LIMIT));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(ERROR_HEADLINE, failures))
        }
    }

    fn execute(&self) -> SfsObject {
        let mut params = SfsObject::new();

        if let Some(expr) = &self.expression {
            params.put_array(KEY_EXPRESSION, expr.to_sfs_array());
        }

        match &self.scope {
            SearchScope::Zone => {}
            SearchScope::Room(id) => params.put_int(KEY_ROOM, *id),
            SearchScope::Group(name) => params.put_utf_string(KEY_GROUP, name.clone()),
        }

        // Out-of-range limits never get here through `build`.
        if let Ok(limit) = i16::try_from(self.limit) {
            if limit > 0 {
                params.put_short(KEY_LIMIT, limit);
            }
        }

        params
    }
}
