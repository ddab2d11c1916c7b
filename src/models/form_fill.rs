use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::answer_key::{ChoiceLabel, QuestionKey};

/// 表单填写数据
///
/// 对应页面上用户输入的内容：基本信息、试卷类型数量、答题卡图片和各题答案。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormFill {
    #[serde(default)]
    pub professor_name: String,
    #[serde(default)]
    pub exam_date: String,
    #[serde(default)]
    pub turma: String,
    /// 试卷类型数量，保持输入框的原始文本；缺省时由配置决定
    #[serde(default, deserialize_with = "deserialize_count_text")]
    pub num_exam_types: Option<String>,
    #[serde(default)]
    pub gabarito_images: Vec<PathBuf>,
    #[serde(default)]
    pub answers: Vec<AnswerFill>,
}

/// 单道题的填写内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFill {
    pub exam_type: u32,
    pub question: QuestionKey,
    #[serde(default, deserialize_with = "deserialize_optional_choice")]
    pub correta: Option<ChoiceLabel>,
    #[serde(default)]
    pub peso_questao: Option<f64>,
}

// 数量既可以写成字符串也可以写成整数
fn deserialize_count_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a count")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(CountVisitor).map(Some)
}

fn deserialize_optional_choice<'de, D>(deserializer: D) -> Result<Option<ChoiceLabel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    ChoiceLabel::parse_selection(&raw).map_err(serde::de::Error::custom)
}
