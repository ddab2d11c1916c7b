use crate::error::{AppError, AppResult, FileError};
use crate::models::form_fill::FormFill;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载表单填写数据
pub async fn load_form_fill(toml_file_path: &Path) -> AppResult<FormFill> {
    let path_text = toml_file_path.display().to_string();

    if !fs::try_exists(toml_file_path).await.unwrap_or(false) {
        return Err(FileError::NotFound { path: path_text }.into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_text, e))?;

    let fill: FormFill = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: path_text.clone(),
        source: e,
    })?;

    tracing::info!(
        "成功加载表单文件 {}: {} 个答案, {} 张图片",
        path_text,
        fill.answers.len(),
        fill.gabarito_images.len()
    );

    Ok(fill)
}

/// 加载表单文件；文件不存在时返回空表单
pub async fn load_form_fill_or_default(toml_file_path: &Path) -> AppResult<FormFill> {
    match load_form_fill(toml_file_path).await {
        Err(AppError::File(FileError::NotFound { path })) => {
            tracing::warn!("⚠️ 表单文件不存在: {}，使用空表单", path);
            Ok(FormFill::default())
        }
        other => other,
    }
}
