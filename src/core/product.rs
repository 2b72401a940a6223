//! Product records as the storefront sees them
//!
//! Products arrive from the catalog API as loosely-shaped JSON. They are
//! decoded through [`RawProduct`], which accepts whatever the API sends, and
//! converted into [`Product`], whose fields are all definite. The conversion
//! is the only place coercion happens.

use crate::core::coerce;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Products with at least this many customization options count as popular
pub const POPULAR_CUSTOMIZATION_THRESHOLD: u32 = 5;

/// Opaque identifier for products, brands and suppliers
///
/// The API is inconsistent about sending ids as numbers or strings, so both
/// decode to the same textual form: `7` and `"7"` are the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an id out of a JSON value, if it is a non-empty string or a number
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

macro_rules! entity_id_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for EntityId {
                fn from(n: $t) -> Self {
                    Self(n.to_string())
                }
            }
        )*
    };
}

entity_id_from_int!(i32, i64, u32, u64);

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom("expected a string or numeric id"))
    }
}

/// Reference to a related record (brand, supplier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    pub name: String,
}

impl EntityRef {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// A reference is only usable if it carries an id; the name is optional
    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = EntityId::from_json(object.get("id")?)?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self { id, name })
    }
}

/// Product as delivered by the catalog API, before coercion
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProduct {
    pub id: Value,
    pub name: Value,
    pub sale_price_inc_tax: Value,
    pub cost_inc_tax: Value,
    pub customize: Value,
    pub customization_count: Value,
    pub customizations: Value,
    pub created_at: Value,
    pub brand: Value,
    pub supplier: Value,
}

/// The raw record lacked a usable id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("product record has no usable id")]
pub struct MissingProductId;

/// A catalog product with every field coerced to a definite value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawProduct")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub sale_price_inc_tax: f64,
    pub cost_inc_tax: f64,
    pub customize: bool,
    pub customization_count: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub brand: Option<EntityRef>,
    pub supplier: Option<EntityRef>,
}

impl TryFrom<RawProduct> for Product {
    type Error = MissingProductId;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = EntityId::from_json(&raw.id).ok_or(MissingProductId)?;

        // An explicit count wins over the length of the options list
        let customization_count = if raw.customization_count.is_null() {
            raw.customizations
                .as_array()
                .map(|options| u32::try_from(options.len()).unwrap_or(u32::MAX))
                .unwrap_or(0)
        } else {
            coerce::count(&raw.customization_count)
        };

        Ok(Self {
            id,
            name: raw.name.as_str().unwrap_or_default().to_string(),
            sale_price_inc_tax: coerce::price(&raw.sale_price_inc_tax),
            cost_inc_tax: coerce::price(&raw.cost_inc_tax),
            customize: coerce::flag(&raw.customize),
            customization_count,
            created_at: coerce::timestamp(&raw.created_at),
            brand: EntityRef::from_json(&raw.brand),
            supplier: EntityRef::from_json(&raw.supplier),
        })
    }
}

impl Product {
    /// Create a product with the given id, name and sale price; other fields
    /// take their empty values
    ///
    /// The price goes through the same rule as decoded prices, so NaN or a
    /// negative amount becomes `0.0`.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, sale_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sale_price_inc_tax: coerce::amount(sale_price),
            cost_inc_tax: 0.0,
            customize: false,
            customization_count: 0,
            created_at: None,
            brand: None,
            supplier: None,
        }
    }

    /// Decode one product from arbitrary JSON
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Decode a list of products, skipping records that cannot be identified
    pub fn list_from_json(values: Vec<Value>) -> Vec<Self> {
        values
            .into_iter()
            .filter_map(|value| match Self::from_json(value) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping undecodable product record");
                    None
                }
            })
            .collect()
    }

    /// Sale price as the filters see it
    ///
    /// The field is public, so a value assigned after construction is
    /// re-checked here.
    pub fn sale_price(&self) -> f64 {
        coerce::amount(self.sale_price_inc_tax)
    }

    pub fn cost_price(&self) -> f64 {
        coerce::amount(self.cost_inc_tax)
    }

    /// On sale: both prices known and the sale price undercuts the cost price
    pub fn is_on_sale(&self) -> bool {
        let (sale, cost) = (self.sale_price(), self.cost_price());
        sale > 0.0 && cost > 0.0 && sale < cost
    }

    pub fn is_popular(&self) -> bool {
        self.customization_count >= POPULAR_CUSTOMIZATION_THRESHOLD
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost_inc_tax = coerce::amount(cost);
        self
    }

    pub fn with_customize(mut self, customize: bool) -> Self {
        self.customize = customize;
        self
    }

    pub fn with_customization_count(mut self, count: u32) -> Self {
        self.customization_count = count;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_brand(mut self, brand: EntityRef) -> Self {
        self.brand = Some(brand);
        self
    }

    pub fn with_supplier(mut self, supplier: EntityRef) -> Self {
        self.supplier = Some(supplier);
        self
    }
}
