//! Where a search looks: the whole zone, one room, or one room group.

use crate::logger::Logger;
use crate::value::SfsValue;

/// Search scope for find requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Every user in the current zone.
    #[default]
    Zone,

    /// Users in the room with this id.
    Room(i32),

    /// Users in rooms belonging to this group.
    Group(String),
}

impl SearchScope {
    pub fn room(room_id: i32) -> Self {
        SearchScope::Room(room_id)
    }

    pub fn group(group_name: impl Into<String>) -> Self {
        SearchScope::Group(group_name.into())
    }

    /// Resolve a loosely typed target coming from a dynamic front end.
    ///
    /// - `Null` searches the zone,
    /// - an integer (`Byte`/`Short`/`Int`, or a `Long` that fits in `i32`)
    ///   is a room id,
    /// - a `UtfString` is a group name.
    ///
    /// Anything else is reported once through `logger` and falls back to
    /// the zone: the request is still sent, just without a target.
    pub fn from_dynamic(target: &SfsValue, logger: &dyn Logger) -> Self {
        match target {
            SfsValue::Null => SearchScope::Zone,
            SfsValue::UtfString(name) => SearchScope::Group(name.clone()),
            other => match other.as_i64().and_then(|id| i32::try_from(id).ok()) {
                Some(id) => SearchScope::Room(id),
                None => {
                    logger.warn(&format!(
                        "Unsupported target type for FindUsers request: {} ({})",
                        other.type_name(),
                        other
                    ));
                    SearchScope::Zone
                }
            },
        }
    }

    pub fn is_zone(&self) -> bool {
        matches!(self, SearchScope::Zone)
    }
}
