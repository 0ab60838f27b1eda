//! Filter and sort vocabulary understood by the broker's `listSessions`
//! operation, and the JSON descriptor it is sent as.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a filter option from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Session attribute a filter can match against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterField {
    Id,
    ConnectionId,
    ConsumerCount,
    User,
    Protocol,
    ClientId,
    LocalAddress,
    RemoteAddress,
}

impl FilterField {
    /// All fields, in the order the filter dropdown lists them
    pub const ALL: [FilterField; 8] = [
        FilterField::Id,
        FilterField::ConnectionId,
        FilterField::ConsumerCount,
        FilterField::User,
        FilterField::Protocol,
        FilterField::ClientId,
        FilterField::LocalAddress,
        FilterField::RemoteAddress,
    ];

    /// Name the broker expects
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Id => "ID",
            FilterField::ConnectionId => "CONNECTION_ID",
            FilterField::ConsumerCount => "CONSUMER_COUNT",
            FilterField::User => "USER",
            FilterField::Protocol => "PROTOCOL",
            FilterField::ClientId => "CLIENT_ID",
            FilterField::LocalAddress => "LOCAL_ADDRESS",
            FilterField::RemoteAddress => "REMOTE_ADDRESS",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Id => "ID",
            FilterField::ConnectionId => "Connection ID",
            FilterField::ConsumerCount => "Consumer Count",
            FilterField::User => "User",
            FilterField::Protocol => "Protocol",
            FilterField::ClientId => "Client ID",
            FilterField::LocalAddress => "Local Address",
            FilterField::RemoteAddress => "Remote Address",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = ParseOptionError;

    /// Case-insensitive; dashes are accepted in place of underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| ParseOptionError::new("filter field", s))
    }
}

/// How a filter value is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperation {
    Equals,
    Contains,
}

impl FilterOperation {
    pub const ALL: [FilterOperation; 2] = [FilterOperation::Equals, FilterOperation::Contains];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperation::Equals => "EQUALS",
            FilterOperation::Contains => "CONTAINS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterOperation::Equals => "Equals",
            FilterOperation::Contains => "Contains",
        }
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperation {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        FilterOperation::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| ParseOptionError::new("filter operation", s))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ParseOptionError::new("sort direction", s)),
        }
    }
}

/// Grid column the server sorts by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortColumn {
    #[default]
    Id,
    ConnectionId,
    User,
    ConsumerCount,
    ProducerCount,
    CreationTime,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Id,
        SortColumn::ConnectionId,
        SortColumn::User,
        SortColumn::ConsumerCount,
        SortColumn::ProducerCount,
        SortColumn::CreationTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::ConnectionId => "CONNECTION_ID",
            SortColumn::User => "USER",
            SortColumn::ConsumerCount => "CONSUMER_COUNT",
            SortColumn::ProducerCount => "PRODUCER_COUNT",
            SortColumn::CreationTime => "CREATION_TIME",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        SortColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == normalized)
            .ok_or_else(|| ParseOptionError::new("sort column", s))
    }
}

/// Current sort key. The grid may report several; only the first is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Build from the grid's parallel field/direction lists.
    ///
    /// Returns `None` when the grid reports no sort field. A missing
    /// direction defaults to ascending.
    pub fn from_grid(fields: &[SortColumn], directions: &[SortDirection]) -> Option<Self> {
        let column = *fields.first()?;
        let direction = directions.first().copied().unwrap_or_default();
        Some(Self { column, direction })
    }
}

/// User-entered filter. All parts empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub field: Option<FilterField>,
    pub operation: Option<FilterOperation>,
    pub value: String,
}

impl Filter {
    pub fn new(field: FilterField, operation: FilterOperation, value: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            operation: Some(operation),
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_none() && self.operation.is_none() && self.value.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Filter::default();
    }
}

/// The descriptor sent as the first `listSessions` argument.
///
/// Unset parts are sent as empty strings, which the broker reads as
/// "match everything".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    pub field: String,
    pub operation: String,
    pub value: String,
    pub sort_order: String,
    pub sort_by: String,
    pub sort_column: String,
}

impl FilterDescriptor {
    pub fn new(filter: &Filter, sort: &SortState) -> Self {
        Self {
            field: filter.field.map(|f| f.as_str().to_string()).unwrap_or_default(),
            operation: filter
                .operation
                .map(|op| op.as_str().to_string())
                .unwrap_or_default(),
            value: filter.value.clone(),
            sort_order: sort.direction.as_str().to_string(),
            sort_by: sort.direction.as_str().to_string(),
            sort_column: sort.column.as_str().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_and_labels() {
        assert_eq!(FilterField::ConnectionId.as_str(), "CONNECTION_ID");
        assert_eq!(FilterField::RemoteAddress.label(), "Remote Address");
        assert_eq!(FilterField::ALL.len(), 8);
    }

    #[test]
    fn field_parsing_is_case_insensitive() {
        assert_eq!("user".parse::<FilterField>(), Ok(FilterField::User));
        assert_eq!("client-id".parse::<FilterField>(), Ok(FilterField::ClientId));
        assert_eq!(" LOCAL_ADDRESS ".parse::<FilterField>(), Ok(FilterField::LocalAddress));
        assert!("ADDRESS".parse::<FilterField>().is_err());
    }

    #[test]
    fn operation_and_direction_parsing() {
        assert_eq!("contains".parse::<FilterOperation>(), Ok(FilterOperation::Contains));
        assert!("LIKE".parse::<FilterOperation>().is_err());
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert_eq!(SortDirection::Desc.reversed(), SortDirection::Asc);
        let err = "sideways".parse::<SortDirection>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sort direction: \"sideways\"");
    }

    #[test]
    fn serde_uses_broker_names() {
        let json = serde_json::to_string(&FilterField::ConsumerCount).unwrap();
        assert_eq!(json, "\"CONSUMER_COUNT\"");
        let json = serde_json::to_string(&SortDirection::Asc).unwrap();
        assert_eq!(json, "\"asc\"");
    }

    #[test]
    fn sort_state_from_grid_uses_first_pair() {
        let sort = SortState::from_grid(
            &[SortColumn::User, SortColumn::Id],
            &[SortDirection::Desc, SortDirection::Asc],
        );
        assert_eq!(sort, Some(SortState::new(SortColumn::User, SortDirection::Desc)));

        let sort = SortState::from_grid(&[SortColumn::CreationTime], &[]);
        assert_eq!(
            sort,
            Some(SortState::new(SortColumn::CreationTime, SortDirection::Asc))
        );

        assert_eq!(SortState::from_grid(&[], &[SortDirection::Desc]), None);
    }

    #[test]
    fn default_descriptor() {
        let descriptor = FilterDescriptor::new(&Filter::default(), &SortState::default());
        assert_eq!(
            descriptor.to_json().unwrap(),
            r#"{"field":"","operation":"","value":"","sortOrder":"asc","sortBy":"asc","sortColumn":"ID"}"#
        );
    }

    #[test]
    fn descriptor_carries_filter_and_sort() {
        let filter = Filter::new(FilterField::User, FilterOperation::Contains, "alice");
        let sort = SortState::new(SortColumn::ConsumerCount, SortDirection::Desc);
        let value: serde_json::Value =
            serde_json::from_str(&FilterDescriptor::new(&filter, &sort).to_json().unwrap())
                .unwrap();
        assert_eq!(value["field"], "USER");
        assert_eq!(value["operation"], "CONTAINS");
        assert_eq!(value["value"], "alice");
        assert_eq!(value["sortColumn"], "CONSUMER_COUNT");
        assert_eq!(value["sortOrder"], "desc");
    }

    #[test]
    fn clearing_filter() {
        let mut filter = Filter::new(FilterField::Id, FilterOperation::Equals, "7");
        assert!(!filter.is_empty());
        filter.clear();
        assert!(filter.is_empty());
    }
}
