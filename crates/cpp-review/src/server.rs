/// MCP server exposing the C/C++ review references.
///
/// Exposes five tools:
/// - `select_references`: Documents and report template for a review category
/// - `get_reference`: One document by ID, with its sections
/// - `list_categories`: Every category with its documents and trigger keywords
/// - `classify_request`: Route free-form request text to categories
/// - `search_references`: Keyword search over document sections
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::debug;

use crate::model::{Category, Document};
use crate::search::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::selector::ReferenceSelector;
use mcp_common::mcp_api::{
    CategoryInfo, CategoryListResponse, CategoryMatchInfo, ClassifyRequestParams,
    ClassifyRequestResponse, DocumentSection as ApiDocumentSection, GetReferenceParams,
    ReferenceDetailResponse, ReferenceDocument, ReferenceSearchResult, SearchReferencesParams,
    SearchReferencesResponse, SelectReferencesParams, SelectReferencesResponse,
};

#[derive(Clone)]
pub struct CppReviewServer {
    selector: Arc<ReferenceSelector>,
    tool_router: ToolRouter<CppReviewServer>,
}

impl CppReviewServer {
    pub fn new(selector: Arc<ReferenceSelector>) -> Self {
        Self {
            selector,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl CppReviewServer {
    #[tool(description = "Get the reference documents for a C/C++ review category ('review', 'security', 'performance', 'modernization', 'architecture') plus a severity-tagged (P0-P3) report template.")]
    async fn select_references(
        &self,
        Parameters(params): Parameters<SelectReferencesParams>,
    ) -> Result<Json<SelectReferencesResponse>, String> {
        let tag = params.category.trim().to_string();
        if tag.is_empty() {
            return Err("category must not be empty".to_string());
        }

        let selection = self.selector.selection(&tag).map_err(|e| {
            format!("{e}. Available categories: {}", Category::available())
        })?;
        debug!(
            category = %selection.category,
            documents = selection.documents.len(),
            "references selected"
        );

        Ok(Json(SelectReferencesResponse {
            category: selection.category.to_string(),
            documents: selection.documents.into_iter().map(to_api_document).collect(),
            output_template: selection.output_template,
        }))
    }

    #[tool(description = "Get one C/C++ review reference document by ID (e.g. 'security-checklist', 'anti-patterns', 'severity-levels'), including its sections.")]
    async fn get_reference(
        &self,
        Parameters(params): Parameters<GetReferenceParams>,
    ) -> Result<Json<ReferenceDetailResponse>, String> {
        let document_id = params.document_id.trim().to_string();
        if document_id.is_empty() {
            return Err("document_id must not be empty".to_string());
        }

        let document = self.selector.document(&document_id).map_err(|e| {
            let available: Vec<&str> = self.selector.documents().map(|d| d.id.as_str()).collect();
            format!("{e}. Available documents: {}", available.join(", "))
        })?;

        Ok(Json(ReferenceDetailResponse {
            document: to_api_document(document),
            sections: document
                .sections
                .iter()
                .map(|s| ApiDocumentSection {
                    heading: s.heading.clone(),
                    content: s.content.clone(),
                })
                .collect(),
            categories: self
                .selector
                .categories_for(&document.id)
                .into_iter()
                .map(|c| c.to_string())
                .collect(),
        }))
    }

    #[tool(description = "List the C/C++ review categories with their reference document IDs and the trigger keywords that route a request to each.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let categories = self
            .selector
            .categories()
            .map(|(category, entry)| CategoryInfo {
                key: category.to_string(),
                summary: entry.map(|e| e.summary.clone()).unwrap_or_default(),
                document_ids: entry.map(|e| e.documents.clone()).unwrap_or_default(),
                triggers: entry.map(|e| e.triggers.clone()).unwrap_or_default(),
            })
            .collect();

        Ok(Json(CategoryListResponse {
            skill: self.selector.skill().to_string(),
            categories,
        }))
    }

    #[tool(description = "Classify a free-form C/C++ review request into categories by trigger keywords. Falls back to 'review' when nothing matches.")]
    async fn classify_request(
        &self,
        Parameters(params): Parameters<ClassifyRequestParams>,
    ) -> Result<Json<ClassifyRequestResponse>, String> {
        let request = params.request.trim().to_string();
        if request.is_empty() {
            return Err("request must not be empty".to_string());
        }

        let classification = self.selector.classify(&request);
        debug!(
            primary = %classification.primary(),
            fallback = classification.fallback,
            "request classified"
        );

        Ok(Json(ClassifyRequestResponse {
            matches: classification
                .matches
                .into_iter()
                .map(|m| CategoryMatchInfo {
                    category: m.category.to_string(),
                    matched_triggers: m.matched_triggers,
                })
                .collect(),
            fallback: classification.fallback,
        }))
    }

    #[tool(description = "Search the C/C++ review references by keywords. Returns matching document sections ranked by relevance.")]
    async fn search_references(
        &self,
        Parameters(params): Parameters<SearchReferencesParams>,
    ) -> Result<Json<SearchReferencesResponse>, String> {
        let query = params.query.trim().to_string();
        if query.is_empty() {
            return Err("query must not be empty".to_string());
        }

        let limit = params
            .limit
            .map_or(DEFAULT_LIMIT, |l| l as usize)
            .min(MAX_LIMIT);

        let results = self
            .selector
            .search(&query, limit)
            .into_iter()
            .map(|hit| ReferenceSearchResult {
                document_id: hit.document_id,
                title: hit.title,
                section: hit.section,
                score: hit.score,
                summary: hit.summary,
            })
            .collect();

        Ok(Json(SearchReferencesResponse { results }))
    }
}

fn to_api_document(document: &Document) -> ReferenceDocument {
    ReferenceDocument {
        id: document.id.clone(),
        title: document.title.clone(),
        body: document.body.clone(),
        digest: document.digest.clone(),
    }
}

#[tool_handler]
impl ServerHandler for CppReviewServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cpp-review".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "C/C++ code review reference server ({}). {} Call classify_request to pick a \
                 category for the user's request, then select_references to load the checklists \
                 and the P0-P3 report template for it. Use get_reference for a single document, \
                 list_categories to browse, and search_references for keyword lookup.",
                self.selector.skill(),
                self.selector.description(),
            )),
        }
    }
}
