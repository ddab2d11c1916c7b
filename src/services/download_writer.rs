//! 下载写入服务 - 业务能力层
//!
//! 只负责"把服务器返回的文件存到下载目录"能力，不关心流程

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 下载写入服务
///
/// 职责：
/// - 以服务器给出的文件名保存结果文件
/// - 写完立即释放内存中的文件内容
pub struct DownloadWriter {
    download_dir: PathBuf,
}

impl DownloadWriter {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// 保存文件，返回完整路径；同名文件直接覆盖
    pub async fn save(&self, filename: &str, bytes: Vec<u8>) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.download_dir).await.map_err(|e| {
            AppError::file_write_failed(self.download_dir.display().to_string(), e)
        })?;

        let target = self.download_dir.join(filename);
        debug!("写入下载文件: {} ({} 字节)", target.display(), bytes.len());

        fs::write(&target, &bytes)
            .await
            .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;
        drop(bytes);

        Ok(target)
    }
}
