use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
///
/// The `id` is assigned by the store at creation time and never changes.
/// Field names on the wire follow the external contract (`nome`, `preco`,
/// `quantidade`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Product {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

/// The caller-supplied fields of a product, shared by create and update.
///
/// Update replaces all three fields at once, so no optional-field patch
/// shape is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFields {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}

impl Product {
    /// Assembles a full record from a store-assigned id and caller fields.
    pub fn new(id: u64, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            quantity: fields.quantity,
        }
    }

    /// The editable portion of the record, for pre-filling edit forms.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }

    /// Applies a full field replacement, keeping the id.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.quantity = fields.quantity;
    }
}
