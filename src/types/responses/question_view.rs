use crate::models::question_model::Question;
use bson::oid::ObjectId;
use serde::Serialize;

/// What quiz consumers see. The correct index and explanation stay server-side
/// until the question has been answered.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: Option<ObjectId>,
    pub branch_id: ObjectId,
    pub level: u32,
    pub text: String,
    pub options: Vec<String>,
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        Self {
            id: question._id,
            branch_id: question.branch_id,
            level: question.level,
            text: question.text,
            options: question.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn view_never_leaks_the_correct_index() {
        let question = Question {
            _id: Some(ObjectId::new()),
            branch_id: ObjectId::new(),
            level: 3,
            text: "2 + 2 = ?".into(),
            options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
            correct_index: 1,
            explanation: Some("Basic addition.".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let body = serde_json::to_value(QuestionView::from(question)).unwrap();
        assert!(body.get("correct_index").is_none());
        assert!(body.get("explanation").is_none());
        assert_eq!(body["options"].as_array().unwrap().len(), 4);
    }
}
