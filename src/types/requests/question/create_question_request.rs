use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub branch_id: String,

    pub level: u32,

    pub text: String,

    pub options: Vec<String>,

    pub correct_index: u32,

    #[serde(default)]
    pub explanation: Option<String>,
}
