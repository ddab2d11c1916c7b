//! 字段注册表
//!
//! 生成表单时登记 (试卷类型, 题号, 字段角色) → 控件编号，提交时直接查表。

use std::collections::HashMap;
use std::fmt;

use crate::models::answer_key::QuestionKey;

/// 字段角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// 正确选项下拉框
    CorrectAnswer,
    /// 题目权重输入框
    QuestionWeight,
}

impl FieldRole {
    fn suffix(self) -> &'static str {
        match self {
            FieldRole::CorrectAnswer => "correct",
            FieldRole::QuestionWeight => "peso_questao",
        }
    }
}

/// 字段的组合键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub exam_type: u32,
    pub question: QuestionKey,
    pub role: FieldRole,
}

impl FieldKey {
    pub fn new(exam_type: u32, question: QuestionKey, role: FieldRole) -> Self {
        Self {
            exam_type,
            question,
            role,
        }
    }

    /// 提交时使用的原生字段名，例如 `exam_answers_2_Q7_peso_questao`
    pub fn field_name(&self) -> String {
        format!(
            "exam_answers_{}_{}_{}",
            self.exam_type,
            self.question,
            self.role.suffix()
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field_name())
    }
}

/// 控件编号（在所属表单的控件列表中的位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub(crate) usize);

/// 字段注册表
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    slots: HashMap<FieldKey, ControlId>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: FieldKey, id: ControlId) {
        self.slots.insert(key, id);
    }

    pub fn lookup(&self, key: &FieldKey) -> Option<ControlId> {
        self.slots.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        let q7 = QuestionKey::new(7).unwrap();
        assert_eq!(
            FieldKey::new(2, q7, FieldRole::QuestionWeight).field_name(),
            "exam_answers_2_Q7_peso_questao"
        );
        assert_eq!(
            FieldKey::new(1, q7, FieldRole::CorrectAnswer).to_string(),
            "exam_answers_1_Q7_correct"
        );
    }

    #[test]
    fn test_lookup_distinguishes_roles() {
        let q1 = QuestionKey::new(1).unwrap();
        let mut registry = FieldRegistry::new();
        registry.register(FieldKey::new(1, q1, FieldRole::CorrectAnswer), ControlId(0));
        registry.register(FieldKey::new(1, q1, FieldRole::QuestionWeight), ControlId(1));

        assert_eq!(
            registry.lookup(&FieldKey::new(1, q1, FieldRole::QuestionWeight)),
            Some(ControlId(1))
        );
        assert_eq!(
            registry.lookup(&FieldKey::new(2, q1, FieldRole::CorrectAnswer)),
            None
        );
        assert_eq!(registry.len(), 2);
    }
}
