use serde::{Deserialize, Serialize};

use storegate_core::ProductId;

/// A row of the `produto` table.
///
/// Field names on the wire are the column names, so a `SELECT *` and this
/// struct serialise identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Id")]
    pub id: ProductId,
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Descricao")]
    pub description: String,
    #[serde(rename = "Preco")]
    pub price: f64,
}

impl Product {
    /// Build the stored representation of `input` under `id`.
    pub fn from_input(id: ProductId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: round_price(input.price),
        }
    }
}

/// Body of `POST /produtos` and `PUT /produtos/{id}` (full replacement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Descricao")]
    pub description: String,
    #[serde(rename = "Preco")]
    pub price: f64,
}

/// Round to cents, the precision of `DECIMAL(10,2)`.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caneta() -> ProductInput {
        ProductInput {
            name: "Caneta".to_string(),
            description: "Azul".to_string(),
            price: 2.50,
        }
    }

    #[test]
    fn wire_names_match_table_columns() {
        let product = Product::from_input(ProductId::new(1), caneta());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Id": 1, "Nome": "Caneta", "Descricao": "Azul", "Preco": 2.5})
        );
    }

    #[test]
    fn input_requires_all_three_fields() {
        let err = serde_json::from_str::<ProductInput>(r#"{"Nome":"Caneta","Preco":1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn from_input_rounds_to_cents() {
        let mut input = caneta();
        input.price = 2.499;
        let product = Product::from_input(ProductId::new(3), input);
        assert_eq!(product.price, 2.5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: rounding is idempotent (re-storing a fetched price is a no-op).
            #[test]
            fn round_price_is_idempotent(cents in 0i64..=99_999_999i64, noise in 0.0f64..0.004) {
                let price = cents as f64 / 100.0 + noise;
                let once = round_price(price);
                prop_assert_eq!(round_price(once), once);
            }

            /// Property: whole-cent prices survive unchanged.
            #[test]
            fn whole_cents_are_preserved(cents in 0i64..=99_999_999i64) {
                let price = cents as f64 / 100.0;
                prop_assert!((round_price(price) - price).abs() < 1e-9);
            }
        }
    }
}
