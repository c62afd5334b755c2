//! Identifiers issued by the backing stores.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Auto-increment primary key of the `produto` table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ProductId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| StoreError::invalid_input(format!("ProductId: {e}")))?;
        Ok(Self(value))
    }
}

/// Document identifier generated by the user store.
///
/// Kept opaque here; the Mongo adapter decides whether a value is a valid
/// ObjectId.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_parses_numeric_strings() {
        let id: ProductId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn product_id_rejects_garbage() {
        let err = "abc".parse::<ProductId>().unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&ProductId::new(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&UserId::new("65f0c0ffee")).unwrap(),
            "\"65f0c0ffee\""
        );
    }
}
