use serde::{Deserialize, Serialize};

use storegate_core::ProductId;

/// `201` body of `POST /produtos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: ProductId,
}

/// Plain confirmation body, e.g. `{"message": "Produto deletado com sucesso"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
