//! 阅卷服务器客户端
//!
//! 封装 `/upload` 提交和模板下载两个接口

use crate::config::Config;
use crate::error::{ApiError, AppResult};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::Form;
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

/// 响应没有给出文件名时使用的默认名称
pub const DEFAULT_RESULT_NAME: &str = "resultados.xlsx";

/// 一次请求的结果
#[derive(Debug)]
pub enum UploadOutcome {
    /// 服务器返回了文件
    Success { bytes: Vec<u8>, filename: String },
    /// 服务器返回非 2xx，附带响应文本
    ServerError(String),
    /// 请求没有完成
    TransportError(reqwest::Error),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }
}

/// 阅卷服务器客户端
pub struct UploadClient {
    client: Client,
    upload_url: String,
    template_url: String,
}

impl UploadClient {
    /// 创建新的客户端（不设置超时）
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::ClientBuildFailed { source: e })?;

        Ok(Self {
            client,
            upload_url: config.endpoint(&config.upload_path),
            template_url: config.endpoint(&config.template_path),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// 提交表单
    ///
    /// # 参数
    /// - `form`: 完整的 multipart 请求体
    ///
    /// # 返回
    /// 返回请求结果，不重试
    pub async fn upload(&self, form: Form) -> UploadOutcome {
        info!("📤 正在提交到 {}", self.upload_url);

        match self.client.post(&self.upload_url).multipart(form).send().await {
            Ok(response) => read_outcome(response, DEFAULT_RESULT_NAME).await,
            Err(e) => UploadOutcome::TransportError(e),
        }
    }

    /// 下载空白答题卡模板
    ///
    /// # 参数
    /// - `name`: 模板文件名
    pub async fn download_template(&self, name: &str) -> UploadOutcome {
        let url = format!("{}/{}", self.template_url.trim_end_matches('/'), name);
        info!("📥 正在下载模板 {}", url);

        let fallback = filename_from_content_disposition(&format!("filename={}", name))
            .unwrap_or_else(|| DEFAULT_RESULT_NAME.to_string());

        match self.client.get(&url).send().await {
            Ok(response) => read_outcome(response, &fallback).await,
            Err(e) => UploadOutcome::TransportError(e),
        }
    }
}

async fn read_outcome(response: Response, fallback_name: &str) -> UploadOutcome {
    let status = response.status();
    debug!("服务器响应状态: {}", status);

    if !status.is_success() {
        return match response.text().await {
            Ok(text) => UploadOutcome::ServerError(text),
            Err(e) => UploadOutcome::TransportError(e),
        };
    }

    let filename = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(filename_from_content_disposition)
        .unwrap_or_else(|| {
            warn!("⚠️ 响应中没有可用的文件名，使用 {}", fallback_name);
            fallback_name.to_string()
        });

    match response.bytes().await {
        Ok(bytes) => UploadOutcome::Success {
            bytes: bytes.to_vec(),
            filename,
        },
        Err(e) => UploadOutcome::TransportError(e),
    }
}

/// 从 `Content-Disposition` 中取文件名
///
/// 带引号时取到闭合引号为止，否则取到下一个 `;`，只保留最后一段路径。
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("filename=")?;
    let rest = rest.trim_start();
    let raw = match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or_default(),
        None => rest.split(';').next().unwrap_or_default(),
    };
    let name = raw.trim().rsplit(['/', '\\']).next().unwrap_or_default().trim();

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}
