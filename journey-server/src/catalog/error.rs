//! Catalog error types.

use crate::domain::{DomainError, RouteType, StationCode};

/// Errors raised while loading or querying the station and route catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A station code is not in the registry
    #[error("station {code} not found")]
    NotFound { code: String },

    /// A route id is not in the catalog
    #[error("route {id} not found")]
    RouteNotFound { id: String },

    /// Two stations share a code
    #[error("duplicate station code {0}")]
    DuplicateStation(StationCode),

    /// Two routes share an id
    #[error("duplicate route id {0}")]
    DuplicateRouteId(String),

    /// Declared type disagrees with the stop list
    #[error("route {id}: declared {declared:?} but has {stops} stops")]
    TypeMismatch {
        id: String,
        declared: RouteType,
        stops: usize,
    },

    /// A station record failed validation
    #[error("station {code}: {source}")]
    InvalidStation {
        code: String,
        #[source]
        source: DomainError,
    },

    /// A route record failed validation
    #[error("route {id}: {source}")]
    InvalidRoute {
        id: String,
        #[source]
        source: DomainError,
    },

    /// Catalog file could not be read
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON for the record schema
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::NotFound { code: "XYZ".into() };
        assert_eq!(err.to_string(), "station XYZ not found");

        let err = CatalogError::RouteNotFound { id: "42".into() };
        assert_eq!(err.to_string(), "route 42 not found");

        let err = CatalogError::TypeMismatch {
            id: "7".into(),
            declared: RouteType::Direct,
            stops: 2,
        };
        assert_eq!(err.to_string(), "route 7: declared Direct but has 2 stops");

        let err = CatalogError::InvalidRoute {
            id: "9".into(),
            source: DomainError::InvalidPrice(-3.0),
        };
        assert_eq!(
            err.to_string(),
            "route 9: invalid price -3: must be a non-negative number"
        );
    }
}
