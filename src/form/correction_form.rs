use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::form::builder::{AnswerForm, FormBuilder};
use crate::models::form_fill::FormFill;

/// 上传图片的字段名
pub const IMAGES_FIELD: &str = "gabarito_images";

/// 阅卷表单
///
/// 持有所有原生字段和生成的答案键控件。
#[derive(Debug, Clone)]
pub struct CorrectionForm {
    pub professor_name: String,
    pub exam_date: String,
    pub turma: String,
    exam_type_count: String,
    gabarito_images: Vec<PathBuf>,
    answers: AnswerForm,
    builder: FormBuilder,
}

impl CorrectionForm {
    /// 创建表单并按初始数量生成控件
    pub fn new(exam_type_count: impl Into<String>) -> Self {
        let mut form = Self {
            professor_name: String::new(),
            exam_date: String::new(),
            turma: String::new(),
            exam_type_count: exam_type_count.into(),
            gabarito_images: Vec::new(),
            answers: AnswerForm::default(),
            builder: FormBuilder::new(),
        };
        form.regenerate();
        form
    }

    /// 由填写数据创建表单，返回表单和成功填入的答案数量
    ///
    /// 填写数据没有给出数量（或为空白）时使用 `default_count`
    pub fn from_fill(fill: &FormFill, default_count: &str) -> (Self, usize) {
        let count = fill
            .num_exam_types
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(default_count);
        let mut form = Self::new(count);
        form.professor_name = fill.professor_name.clone();
        form.exam_date = fill.exam_date.clone();
        form.turma = fill.turma.clone();
        for image in &fill.gabarito_images {
            form.add_image(image);
        }
        let applied = form.apply_answers(fill);
        (form, applied)
    }

    /// 修改试卷类型数量，相当于输入框的 change 事件
    pub fn set_exam_type_count(&mut self, text: impl Into<String>) {
        self.exam_type_count = text.into();
        self.regenerate();
    }

    pub fn exam_type_count_text(&self) -> &str {
        &self.exam_type_count
    }

    /// 按当前数量重新生成答案键控件（旧的选择全部清空）
    pub fn regenerate(&mut self) {
        self.answers = self.builder.generate(&self.exam_type_count);
    }

    pub fn answers(&self) -> &AnswerForm {
        &self.answers
    }

    pub fn answers_mut(&mut self) -> &mut AnswerForm {
        &mut self.answers
    }

    pub fn add_image(&mut self, path: impl AsRef<Path>) {
        self.gabarito_images.push(path.as_ref().to_path_buf());
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.gabarito_images
    }

    /// 所有文本字段 (字段名, 值)，包括生成的控件
    pub fn text_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("professor_name".to_string(), self.professor_name.clone()),
            ("exam_date".to_string(), self.exam_date.clone()),
            ("turma".to_string(), self.turma.clone()),
            ("num_exam_types".to_string(), self.exam_type_count.clone()),
        ];
        fields.extend(self.answers.native_fields());
        fields
    }

    /// 把填写数据中的答案填入控件；找不到的控件只记录警告
    fn apply_answers(&mut self, fill: &FormFill) -> usize {
        let mut applied = 0;
        for answer in &fill.answers {
            let result = self
                .answers
                .select_correct(answer.exam_type, answer.question, answer.correta)
                .and_then(|()| match answer.peso_questao {
                    Some(weight) => self
                        .answers
                        .set_weight(answer.exam_type, answer.question, weight),
                    None => Ok(()),
                });

            match result {
                Ok(()) => applied += 1,
                Err(e) => warn!(
                    "⚠️ 跳过答案 (试卷类型 {} {}): {}",
                    answer.exam_type, answer.question, e
                ),
            }
        }
        debug!("已填入 {}/{} 个答案", applied, fill.answers.len());
        applied
    }
}
