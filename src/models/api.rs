use crate::models::claim::ClaimRecord;
use crate::navigation::controller::{Navigator, Page};
use crate::validation::form::FormSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ApiKeyQuery {
    pub api_key: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub logged_in: bool,
    pub current_user: Option<String>,
    pub active_page: Page,
    pub history_len: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NavEntry {
    pub page: Page,
    pub label: String,
    pub active: bool,
}

/// Navigation bar model
#[derive(Debug, Serialize, Deserialize)]
pub struct NavResponse {
    pub pages: Vec<NavEntry>,
    pub active_index: usize,
    pub can_go_back: bool,
    pub can_go_next: bool,
}

impl NavResponse {
    pub fn from_navigator(nav: &Navigator) -> Self {
        Self {
            pages: Page::ORDER
                .iter()
                .map(|page| NavEntry {
                    page: *page,
                    label: page.label().to_string(),
                    active: *page == nav.current(),
                })
                .collect(),
            active_index: nav.index(),
            can_go_back: nav.can_go_back(),
            can_go_next: nav.can_go_next(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub amount: f64,
    pub display_amount: String,
    pub strategy: String,
    pub fell_back: bool,
    pub record: ClaimRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub records: Vec<ClaimRecord>,
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportContact {
    pub contact_name: String,
    pub phone: String,
    pub email: String,
}

/// Content of the active page, ready for a client to render
#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageView {
    Home {
        username: String,
        headline: &'static str,
        tagline: &'static str,
        call_to_action: Page,
    },
    Predict {
        available: bool,
        strategy: &'static str,
        schema: FormSchema,
    },
    Monitor {
        records: Vec<ClaimRecord>,
        message: Option<&'static str>,
    },
    Support {
        contact: SupportContact,
    },
}
