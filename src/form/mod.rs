//! 表单层
//!
//! 无界面的表单模型：原生字段、按试卷类型数量生成的控件以及字段注册表。

pub mod builder;
pub mod controls;
pub mod correction_form;
pub mod registry;

pub use builder::{
    parse_exam_type_count, AnswerForm, ExamTypeGroup, FormBuilder, QuestionRow, MAX_EXAM_TYPES,
};
pub use controls::{Control, NumberInput, SelectControl};
pub use correction_form::{CorrectionForm, IMAGES_FIELD};
pub use registry::{ControlId, FieldKey, FieldRegistry, FieldRole};
