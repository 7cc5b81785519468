use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateBranchRequest {
    pub name: String,

    pub description: String,

    #[serde(default)]
    pub icon_url: Option<String>,

    #[serde(default)]
    pub level_count: Option<u32>,
}
