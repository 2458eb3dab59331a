use serde::{Deserialize, Serialize};

/// Identifier echoed back by create, update and delete endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub id: u64,
}
