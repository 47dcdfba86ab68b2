use serde::Deserialize;

use crate::store::{ListQuery, SortKey};

/// Query parameters accepted by the list route. Listing never fails:
/// unknown parameters and unknown sort keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub nome: Option<String>,
    #[serde(rename = "ordenarPor")]
    pub ordenar_por: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> ListQuery {
        ListQuery {
            name: self.nome,
            sort: self.ordenar_por.as_deref().and_then(SortKey::parse),
        }
    }
}
