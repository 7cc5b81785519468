use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub selected_index: u32,
}
