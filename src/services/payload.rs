//! 上传内容组装 - 业务能力层
//!
//! 从表单控件重建答案键，并和原生字段、图片一起组成 multipart 请求体。

use reqwest::multipart::{Form, Part};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::form::{parse_exam_type_count, CorrectionForm, IMAGES_FIELD};
use crate::models::answer_key::{AnswerKeyEntry, ExamAnswerKey, QuestionKey};

/// 答案键 JSON 的字段名
pub const EXAM_ANSWERS_FIELD: &str = "exam_answers";

/// 从控件重建答案键
///
/// 按当前数量逐组逐题查注册表；控件不存在的题目直接跳过。
pub fn collect_exam_answers(form: &CorrectionForm) -> ExamAnswerKey {
    let mut key = ExamAnswerKey::new();
    let Some(count) = parse_exam_type_count(form.exam_type_count_text()) else {
        return key;
    };

    let answers = form.answers();
    for exam_type in 1..=count {
        key.add_exam_type(exam_type);
        for question in QuestionKey::all() {
            let (Some(correct), Some(input)) = (
                answers.correct_of(exam_type, question),
                answers.weight_input(exam_type, question),
            ) else {
                continue;
            };

            if !input.in_hint_range() {
                warn!(
                    "⚠️ {} 的权重 {} 超出建议范围 [0, 2]，按原值提交",
                    input.name(),
                    input.value()
                );
            }

            key.insert(
                exam_type,
                question,
                AnswerKeyEntry::derive(correct, input.value()),
            );
        }
    }
    key
}

/// 一个文件字段
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// 待提交的请求体
#[derive(Debug, Clone, Default)]
pub struct SubmissionPayload {
    pub text_fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl SubmissionPayload {
    /// 查找文本字段
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text_fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in self.text_fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(file.mime)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

/// 组装请求体：原生字段 + 图片 + `exam_answers`
pub async fn build_payload(form: &CorrectionForm) -> AppResult<SubmissionPayload> {
    let mut payload = SubmissionPayload {
        text_fields: form.text_fields(),
        files: Vec::with_capacity(form.images().len()),
    };

    for path in form.images() {
        payload.files.push(read_file_part(path).await?);
    }

    let exam_answers = collect_exam_answers(form);
    payload
        .text_fields
        .push((EXAM_ANSWERS_FIELD.to_string(), exam_answers.to_json()?));

    debug!(
        "请求体: {} 个文本字段, {} 个文件, {} 个试卷类型",
        payload.text_fields.len(),
        payload.files.len(),
        exam_answers.exam_type_count()
    );

    Ok(payload)
}

async fn read_file_part(path: &Path) -> AppResult<FilePart> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(FilePart {
        field: IMAGES_FIELD.to_string(),
        mime: guess_mime(path),
        file_name,
        bytes,
    })
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
