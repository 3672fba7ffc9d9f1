use serde::Serialize;
use utoipa::ToSchema;

// Success and failure bodies are distinct types so a response can never carry
// both `data` and `error`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: String,
}
