//! 答案键（gabarito）数据模型
//!
//! JSON 字段名与阅卷服务器约定一致：`peso_questao` / `pesos_alternativas` / `correta`。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// 每种试卷的题目数量（固定约定，不从数据推导）
pub const QUESTIONS_PER_EXAM: u8 = 10;

/// 题目默认权重
pub const DEFAULT_QUESTION_WEIGHT: f64 = 1.0;

/// 选项标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
    E,
}

impl ChoiceLabel {
    /// 全部选项，按显示顺序
    pub const ALL: [ChoiceLabel; 5] = [
        ChoiceLabel::A,
        ChoiceLabel::B,
        ChoiceLabel::C,
        ChoiceLabel::D,
        ChoiceLabel::E,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceLabel::A => "A",
            ChoiceLabel::B => "B",
            ChoiceLabel::C => "C",
            ChoiceLabel::D => "D",
            ChoiceLabel::E => "E",
        }
    }

    /// 解析下拉框取值：空字符串表示未选择
    pub fn parse_selection(value: &str) -> Result<Option<Self>, FormError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for ChoiceLabel {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(ChoiceLabel::A),
            "B" => Ok(ChoiceLabel::B),
            "C" => Ok(ChoiceLabel::C),
            "D" => Ok(ChoiceLabel::D),
            "E" => Ok(ChoiceLabel::E),
            _ => Err(FormError::InvalidChoice {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChoiceLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChoiceLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 题号 `Q1..Q10`，按数字排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionKey(u8);

impl QuestionKey {
    pub fn new(number: u8) -> Option<Self> {
        (1..=QUESTIONS_PER_EXAM)
            .contains(&number)
            .then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// 所有题号，按顺序
    pub fn all() -> impl Iterator<Item = QuestionKey> {
        (1..=QUESTIONS_PER_EXAM).map(QuestionKey)
    }
}

impl FromStr for QuestionKey {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormError::InvalidQuestionKey {
            value: s.to_string(),
        };
        let digits = s
            .trim()
            .strip_prefix('Q')
            .or_else(|| s.trim().strip_prefix('q'))
            .ok_or_else(invalid)?;
        let number: u8 = digits.parse().map_err(|_| invalid())?;
        QuestionKey::new(number).ok_or_else(invalid)
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl Serialize for QuestionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 单道题的答案键
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    #[serde(rename = "peso_questao")]
    pub question_weight: f64,

    #[serde(rename = "pesos_alternativas")]
    pub alternative_weights: BTreeMap<ChoiceLabel, f64>,

    #[serde(rename = "correta", with = "correct_label")]
    pub correct: Option<ChoiceLabel>,
}

impl AnswerKeyEntry {
    /// 由正确选项推导各选项权重：正确选项 1.0，其余 0.0；未选择时全部为 0.0
    pub fn derive(correct: Option<ChoiceLabel>, question_weight: f64) -> Self {
        let alternative_weights = ChoiceLabel::ALL
            .iter()
            .map(|&label| {
                let weight = if Some(label) == correct { 1.0 } else { 0.0 };
                (label, weight)
            })
            .collect();

        Self {
            question_weight,
            alternative_weights,
            correct,
        }
    }

    pub fn weight_of(&self, label: ChoiceLabel) -> f64 {
        self.alternative_weights.get(&label).copied().unwrap_or(0.0)
    }
}

/// 全部试卷类型的答案键：试卷类型编号（1..N） → 题号 → 答案键
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamAnswerKey(BTreeMap<u32, BTreeMap<QuestionKey, AnswerKeyEntry>>);

impl ExamAnswerKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个试卷类型（即使还没有题目）
    pub fn add_exam_type(&mut self, exam_type: u32) {
        self.0.entry(exam_type).or_default();
    }

    pub fn insert(&mut self, exam_type: u32, question: QuestionKey, entry: AnswerKeyEntry) {
        self.0.entry(exam_type).or_default().insert(question, entry);
    }

    pub fn get(&self, exam_type: u32, question: QuestionKey) -> Option<&AnswerKeyEntry> {
        self.0.get(&exam_type).and_then(|questions| questions.get(&question))
    }

    pub fn questions(&self, exam_type: u32) -> Option<&BTreeMap<QuestionKey, AnswerKeyEntry>> {
        self.0.get(&exam_type)
    }

    pub fn exam_type_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &BTreeMap<QuestionKey, AnswerKeyEntry>)> {
        self.0.iter()
    }

    /// 序列化为上传字段 `exam_answers` 的内容
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `correta` 字段：未选择时写成空字符串
mod correct_label {
    use super::ChoiceLabel;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        value: &Option<ChoiceLabel>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(ChoiceLabel::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ChoiceLabel>, D::Error> {
        struct CorrectVisitor;

        impl<'de> Visitor<'de> for CorrectVisitor {
            type Value = Option<ChoiceLabel>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an empty string or one of A-E")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                ChoiceLabel::parse_selection(value).map_err(E::custom)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }
        }

        deserializer.deserialize_any(CorrectVisitor)
    }
}
