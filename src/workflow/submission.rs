//! 提交流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整流程
//!
//! 流程顺序：
//! 1. 显示"处理中"
//! 2. 从控件重建答案键并组装请求体
//! 3. POST /upload（只发一次，不重试）
//! 4. 按结果分派：保存文件 / 显示服务器错误 / 显示连接错误

use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::clients::{UploadClient, UploadOutcome};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::form::CorrectionForm;
use crate::services::{build_payload, DownloadWriter};
use crate::workflow::status::{
    StatusArea, StatusMessage, MSG_CONNECTION_ERROR, MSG_CORRECTION_DONE, MSG_PROCESSING,
    MSG_TEMPLATE_DONE,
};

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// 文件已保存
    Downloaded(PathBuf),
    /// 服务器拒绝，附带响应文本
    ServerRejected(String),
    /// 无法连接服务器
    Unreachable,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Downloaded(_))
    }
}

/// 提交控制器
///
/// - 持有表单、客户端、下载目录和状态区
/// - 一次只处理一个提交（`&mut self`）
pub struct SubmissionController {
    form: CorrectionForm,
    client: UploadClient,
    writer: DownloadWriter,
    status: StatusArea,
}

impl SubmissionController {
    pub fn new(form: CorrectionForm, client: UploadClient, writer: DownloadWriter) -> Self {
        Self {
            form,
            client,
            writer,
            status: StatusArea::new(),
        }
    }

    /// 按配置创建控制器
    pub fn from_config(config: &Config, form: CorrectionForm) -> AppResult<Self> {
        Ok(Self::new(
            form,
            UploadClient::new(config)?,
            DownloadWriter::new(&config.download_dir),
        ))
    }

    pub fn form(&self) -> &CorrectionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CorrectionForm {
        &mut self.form
    }

    pub fn status(&self) -> &StatusArea {
        &self.status
    }

    /// 提交表单
    ///
    /// 服务器错误和连接错误都不算 `Err`，只更新状态区；
    /// `Err` 只用于本地失败（读图片、写文件等）。
    pub async fn submit(&mut self) -> AppResult<SubmissionResult> {
        self.status.show(StatusMessage::info(MSG_PROCESSING));

        let payload = match build_payload(&self.form).await {
            Ok(payload) => payload,
            Err(e) => return self.fail(e),
        };

        let multipart = match payload.into_multipart() {
            Ok(multipart) => multipart,
            Err(e) => {
                let err: AppError = ApiError::RequestBuildFailed {
                    endpoint: self.client.upload_url().to_string(),
                    source: e,
                }
                .into();
                return self.fail(err);
            }
        };

        let outcome = self.client.upload(multipart).await;
        let result = self.dispatch(outcome, MSG_CORRECTION_DONE).await?;

        if result.is_success() {
            // 清空答案键的选择，已选图片保留
            self.form.regenerate();
        }
        Ok(result)
    }

    /// 下载空白答题卡模板
    pub async fn fetch_template(&mut self, name: &str) -> AppResult<SubmissionResult> {
        self.status.show(StatusMessage::info(MSG_PROCESSING));
        let outcome = self.client.download_template(name).await;
        self.dispatch(outcome, MSG_TEMPLATE_DONE).await
    }

    async fn dispatch(
        &mut self,
        outcome: UploadOutcome,
        success_message: &str,
    ) -> AppResult<SubmissionResult> {
        match outcome {
            UploadOutcome::Success { bytes, filename } => {
                let path = match self.writer.save(&filename, bytes).await {
                    Ok(path) => path,
                    Err(e) => return self.fail(e),
                };
                info!("✓ 文件已保存: {}", path.display());
                self.status.show(StatusMessage::success(success_message));
                Ok(SubmissionResult::Downloaded(path))
            }
            UploadOutcome::ServerError(text) => {
                warn!("⚠️ 服务器返回错误: {}", text);
                self.status.show(StatusMessage::erro(&text));
                Ok(SubmissionResult::ServerRejected(text))
            }
            UploadOutcome::TransportError(e) => {
                error!("❌ 提交表单时无法连接服务器: {:?}", e);
                self.status.show(StatusMessage::error(MSG_CONNECTION_ERROR));
                Ok(SubmissionResult::Unreachable)
            }
        }
    }

    fn fail<T>(&mut self, err: AppError) -> AppResult<T> {
        self.status.show(StatusMessage::erro(&err));
        Err(err)
    }
}
