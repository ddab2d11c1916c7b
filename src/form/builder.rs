//! 答案键表单生成
//!
//! 试卷类型数量变化时，清空旧控件并重新生成 N 组 × 10 题。

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::FormError;
use crate::form::controls::{Control, NumberInput, SelectControl};
use crate::form::registry::{ControlId, FieldKey, FieldRegistry, FieldRole};
use crate::models::answer_key::{ChoiceLabel, QuestionKey};

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid regex"));

/// 试卷类型数量上限，超过时按无效处理
pub const MAX_EXAM_TYPES: u32 = 100;

/// 解析试卷类型数量
///
/// 只取开头的整数部分（"3份" → 3），解析失败、小于 1 或超过
/// [`MAX_EXAM_TYPES`] 时返回 `None`。
pub fn parse_exam_type_count(text: &str) -> Option<u32> {
    let digits = LEADING_INTEGER.captures(text)?.get(1)?.as_str();
    let count: i64 = digits.parse().ok()?;
    if count < 1 || count > i64::from(MAX_EXAM_TYPES) {
        return None;
    }
    u32::try_from(count).ok()
}

/// 一道题的一行控件
#[derive(Debug, Clone)]
pub struct QuestionRow {
    pub question: QuestionKey,
    pub label: String,
    pub correct: ControlId,
    pub weight: ControlId,
}

/// 一个试卷类型的题目组
#[derive(Debug, Clone)]
pub struct ExamTypeGroup {
    pub exam_type: u32,
    pub title: String,
    pub rows: Vec<QuestionRow>,
}

/// 生成好的答案键表单
#[derive(Debug, Clone, Default)]
pub struct AnswerForm {
    groups: Vec<ExamTypeGroup>,
    controls: Vec<Control>,
    registry: FieldRegistry,
}

impl AnswerForm {
    pub fn groups(&self) -> &[ExamTypeGroup] {
        &self.groups
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn exam_type_count(&self) -> usize {
        self.groups.len()
    }

    pub fn select_count(&self) -> usize {
        self.controls
            .iter()
            .filter(|c| matches!(c, Control::Select(_)))
            .count()
    }

    pub fn weight_input_count(&self) -> usize {
        self.controls
            .iter()
            .filter(|c| matches!(c, Control::Number(_)))
            .count()
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    /// 通过组合键查找控件
    pub fn lookup(&self, key: &FieldKey) -> Option<&Control> {
        self.registry.lookup(key).and_then(|id| self.control(id))
    }

    fn lookup_mut(&mut self, key: &FieldKey) -> Result<&mut Control, FormError> {
        self.registry
            .lookup(key)
            .and_then(|id| self.controls.get_mut(id.0))
            .ok_or_else(|| FormError::FieldNotFound {
                field: key.field_name(),
            })
    }

    /// 选择某题的正确选项（`None` 表示清空）
    pub fn select_correct(
        &mut self,
        exam_type: u32,
        question: QuestionKey,
        value: Option<ChoiceLabel>,
    ) -> Result<(), FormError> {
        let key = FieldKey::new(exam_type, question, FieldRole::CorrectAnswer);
        let select = self
            .lookup_mut(&key)?
            .as_select_mut()
            .ok_or_else(|| FormError::WrongControl {
                field: key.field_name(),
                expected: "下拉框",
            })?;
        select.select(value);
        Ok(())
    }

    /// 设置某题的权重
    pub fn set_weight(
        &mut self,
        exam_type: u32,
        question: QuestionKey,
        value: f64,
    ) -> Result<(), FormError> {
        let key = FieldKey::new(exam_type, question, FieldRole::QuestionWeight);
        let input = self
            .lookup_mut(&key)?
            .as_number_mut()
            .ok_or_else(|| FormError::WrongControl {
                field: key.field_name(),
                expected: "数值输入框",
            })?;
        input.set(value)
    }

    /// 读取某题下拉框的当前值；控件不存在时返回 `None`
    pub fn correct_of(&self, exam_type: u32, question: QuestionKey) -> Option<Option<ChoiceLabel>> {
        self.lookup(&FieldKey::new(exam_type, question, FieldRole::CorrectAnswer))
            .and_then(Control::as_select)
            .map(SelectControl::value)
    }

    /// 读取某题权重输入框
    pub fn weight_input(&self, exam_type: u32, question: QuestionKey) -> Option<&NumberInput> {
        self.lookup(&FieldKey::new(exam_type, question, FieldRole::QuestionWeight))
            .and_then(Control::as_number)
    }

    pub fn weight_of(&self, exam_type: u32, question: QuestionKey) -> Option<f64> {
        self.weight_input(exam_type, question).map(NumberInput::value)
    }

    /// 所有控件的 (字段名, 值)，按生成顺序
    pub fn native_fields(&self) -> Vec<(String, String)> {
        self.controls
            .iter()
            .map(|c| (c.name().to_string(), c.field_value()))
            .collect()
    }
}

/// 表单生成器
#[derive(Debug, Clone, Default)]
pub struct FormBuilder;

impl FormBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 按输入框文本生成表单；数量无效时返回空表单
    pub fn generate(&self, count_text: &str) -> AnswerForm {
        match parse_exam_type_count(count_text) {
            Some(count) => self.build(count),
            None => {
                debug!("试卷类型数量无效: {:?}，不生成字段", count_text);
                AnswerForm::default()
            }
        }
    }

    /// 生成 `count` 组题目
    pub fn build(&self, count: u32) -> AnswerForm {
        let mut form = AnswerForm::default();

        for exam_type in 1..=count {
            let mut group = ExamTypeGroup {
                exam_type,
                title: format!("Tipo de Prova {}", exam_type),
                rows: Vec::new(),
            };

            for question in QuestionKey::all() {
                let correct_key = FieldKey::new(exam_type, question, FieldRole::CorrectAnswer);
                let weight_key = FieldKey::new(exam_type, question, FieldRole::QuestionWeight);

                let correct = push_control(
                    &mut form,
                    correct_key,
                    Control::Select(SelectControl::new(correct_key.field_name())),
                );
                let weight = push_control(
                    &mut form,
                    weight_key,
                    Control::Number(NumberInput::new(
                        weight_key.field_name(),
                        format!("Peso {}", question),
                    )),
                );

                group.rows.push(QuestionRow {
                    question,
                    label: format!("Questão {}:", question.number()),
                    correct,
                    weight,
                });
            }

            form.groups.push(group);
        }

        debug!(
            "已生成 {} 组题目，共 {} 个控件",
            form.groups.len(),
            form.controls.len()
        );
        form
    }
}

fn push_control(form: &mut AnswerForm, key: FieldKey, control: Control) -> ControlId {
    let id = ControlId(form.controls.len());
    form.controls.push(control);
    form.registry.register(key, id);
    id
}
