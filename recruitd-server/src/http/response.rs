//! Success envelope

use axum::Json;
use serde::Serialize;

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

/// Payload for responses that only carry a message
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
