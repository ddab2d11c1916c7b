//! 表单控件
//!
//! 每道题两个控件：正确选项下拉框和题目权重输入框。

use crate::error::FormError;
use crate::models::answer_key::{ChoiceLabel, DEFAULT_QUESTION_WEIGHT};

/// 权重输入框的步长
pub const WEIGHT_STEP: f64 = 0.1;
/// 权重输入框的最小值（仅为提示，不强制）
pub const WEIGHT_MIN: f64 = 0.0;
/// 权重输入框的最大值（仅为提示，不强制）
pub const WEIGHT_MAX: f64 = 2.0;

/// 正确选项下拉框，取值 `"" | A..E`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectControl {
    name: String,
    value: Option<ChoiceLabel>,
}

impl SelectControl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<ChoiceLabel> {
        self.value
    }

    pub fn select(&mut self, value: Option<ChoiceLabel>) {
        self.value = value;
    }

    /// 下拉框的全部选项：(取值, 显示文本)
    pub fn options() -> [(&'static str, &'static str); 6] {
        [
            ("", "Selecione"),
            ("A", "A"),
            ("B", "B"),
            ("C", "C"),
            ("D", "D"),
            ("E", "E"),
        ]
    }

    /// 表单提交时的字段值
    pub fn field_value(&self) -> String {
        self.value
            .map(|label| label.as_str().to_string())
            .unwrap_or_default()
    }
}

/// 题目权重输入框
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    name: String,
    value: f64,
    placeholder: String,
}

impl NumberInput {
    pub fn new(name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: DEFAULT_QUESTION_WEIGHT,
            placeholder: placeholder.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// 设置权重；只拒绝非有限数值，范围 [0, 2] 不强制
    pub fn set(&mut self, value: f64) -> Result<(), FormError> {
        if !value.is_finite() {
            return Err(FormError::InvalidWeight {
                field: self.name.clone(),
                value,
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn in_hint_range(&self) -> bool {
        (WEIGHT_MIN..=WEIGHT_MAX).contains(&self.value)
    }

    pub fn field_value(&self) -> String {
        self.value.to_string()
    }
}

/// 表单控件
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Select(SelectControl),
    Number(NumberInput),
}

impl Control {
    pub fn name(&self) -> &str {
        match self {
            Control::Select(select) => select.name(),
            Control::Number(input) => input.name(),
        }
    }

    pub fn field_value(&self) -> String {
        match self {
            Control::Select(select) => select.field_value(),
            Control::Number(input) => input.field_value(),
        }
    }

    pub fn as_select(&self) -> Option<&SelectControl> {
        match self {
            Control::Select(select) => Some(select),
            Control::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<&NumberInput> {
        match self {
            Control::Number(input) => Some(input),
            Control::Select(_) => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut SelectControl> {
        match self {
            Control::Select(select) => Some(select),
            Control::Number(_) => None,
        }
    }

    pub fn as_number_mut(&mut self) -> Option<&mut NumberInput> {
        match self {
            Control::Number(input) => Some(input),
            Control::Select(_) => None,
        }
    }
}
