use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::structure::StructuralAnalysis;

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateQuery {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub snippet: String,
    pub full_content: String,
    pub analysis: StructuralAnalysis,
    pub suggestions: Vec<String>,
    pub gemini_suggestions: String,
    pub execution_time: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub url: Option<String>,
    pub question: Option<String>,
    #[serde(default = "default_data_type")]
    pub data_type: String,
}

fn default_data_type() -> String {
    "everything".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub response: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    pub content: Option<Value>,
    pub format_type: Option<String>,
    #[serde(default = "default_filename_base")]
    pub filename_base: String,
}

fn default_filename_base() -> String {
    "output".to_string()
}
