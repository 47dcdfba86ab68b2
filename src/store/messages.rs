use tokio::sync::oneshot;

use crate::domain::{Product, ProductFields};

use super::error::StoreError;

/// Generic type aliases for service communication.
pub type ServiceResult<T> = std::result::Result<T, StoreError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// The single sort key the list contract recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    QuantityAsc,
}

impl SortKey {
    /// Parses the wire value of the `ordenarPor` parameter. Unknown values
    /// yield `None` and the caller applies no sort.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "quantidade-asc" => Some(Self::QuantityAsc),
            _ => None,
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            Self::QuantityAsc => "quantidade-asc",
        }
    }
}

/// Options for the list operation: an optional case-insensitive name
/// substring filter, and an optional sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub name: Option<String>,
    pub sort: Option<SortKey>,
}

/// Typed message enum for store communication. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum StoreRequest {
    List {
        query: ListQuery,
        respond_to: ServiceResponse<Vec<Product>>,
    },
    Get {
        id: u64,
        respond_to: ServiceResponse<Product>,
    },
    Create {
        fields: ProductFields,
        respond_to: ServiceResponse<Product>,
    },
    Update {
        id: u64,
        fields: ProductFields,
        respond_to: ServiceResponse<Product>,
    },
    Delete {
        id: u64,
        respond_to: ServiceResponse<()>,
    },
    Shutdown,
    #[cfg(test)]
    Count {
        respond_to: ServiceResponse<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::SortKey;

    #[test]
    fn sort_key_recognizes_only_quantity_ascending() {
        assert_eq!(SortKey::parse("quantidade-asc"), Some(SortKey::QuantityAsc));
        assert_eq!(SortKey::parse("quantidade-desc"), None);
        assert_eq!(SortKey::parse("nome"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn sort_key_round_trips_through_wire_value() {
        let key = SortKey::QuantityAsc;
        assert_eq!(SortKey::parse(key.wire_value()), Some(key));
    }
}
