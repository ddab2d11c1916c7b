pub mod answer_key;
pub mod form_fill;
pub mod loaders;

pub use answer_key::{
    AnswerKeyEntry, ChoiceLabel, ExamAnswerKey, QuestionKey, DEFAULT_QUESTION_WEIGHT,
    QUESTIONS_PER_EXAM,
};
pub use form_fill::{AnswerFill, FormFill};
pub use loaders::{load_form_fill, load_form_fill_or_default};
