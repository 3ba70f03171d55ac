use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectReferencesParams {
    /// Review category: "review", "security", "performance", "modernization" or "architecture".
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetReferenceParams {
    /// Document ID such as "security-checklist" or "severity-levels".
    pub document_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClassifyRequestParams {
    /// The user's request text, e.g. "check this parser for buffer overflows".
    pub request: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchReferencesParams {
    /// Keywords to look for in the reference documents.
    pub query: String,
    /// Maximum number of results to return (default: 10, max: 50).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceDocument {
    pub id: String,
    pub title: String,
    pub body: String,
    /// `sha256:<hex>` of the body.
    pub digest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectReferencesResponse {
    pub category: String,
    /// Documents in the order the agent should read them.
    pub documents: Vec<ReferenceDocument>,
    /// Severity-tagged markdown skeleton for the review report.
    pub output_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentSection {
    pub heading: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceDetailResponse {
    pub document: ReferenceDocument,
    pub sections: Vec<DocumentSection>,
    /// Categories whose selection includes this document.
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: String,
    pub summary: String,
    pub document_ids: Vec<String>,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub skill: String,
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryMatchInfo {
    pub category: String,
    pub matched_triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassifyRequestResponse {
    /// Best match first.
    pub matches: Vec<CategoryMatchInfo>,
    /// True when no trigger matched and the general review category was chosen.
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceSearchResult {
    pub document_id: String,
    pub title: String,
    pub section: String,
    pub score: u32,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchReferencesResponse {
    pub results: Vec<ReferenceSearchResult>,
}
