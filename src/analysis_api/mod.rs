//! Client for the remote medical image analysis service.
//!
//! The service accepts `{ "image": "<base64>" }` and answers with either the
//! analysis fields or `{ "error": "<message>" }`.

mod client;
mod wire;

pub use client::{AnalysisClient, encode_image};
pub use wire::{AnalysisError, AnalysisResult, AnalyzeRequest, REJECTED_IMAGE_MESSAGE};
