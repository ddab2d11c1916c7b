//! 状态消息区
//!
//! 页面上唯一的提示区域：处理中 / 成功 / 错误。

use tracing::{error, info};

pub const MSG_PROCESSING: &str = "Processando... Por favor, aguarde.";
pub const MSG_CORRECTION_DONE: &str = "Correção concluída! O arquivo Excel foi baixado.";
pub const MSG_TEMPLATE_DONE: &str = "Modelo de gabarito baixado.";
pub const MSG_CONNECTION_ERROR: &str = "Erro ao conectar com o servidor. Tente novamente.";

/// 消息样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    /// 显示颜色
    pub fn color(self) -> &'static str {
        match self {
            StatusKind::Info => "blue",
            StatusKind::Success => "green",
            StatusKind::Error => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    /// 服务器或本地错误统一加 `Erro: ` 前缀
    pub fn erro(detail: impl std::fmt::Display) -> Self {
        Self::error(format!("Erro: {}", detail))
    }
}

/// 状态消息区，保留历史便于调用方回看
#[derive(Debug, Clone, Default)]
pub struct StatusArea {
    history: Vec<StatusMessage>,
}

impl StatusArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: StatusMessage) {
        match message.kind {
            StatusKind::Error => error!("[状态] {}", message.text),
            StatusKind::Info | StatusKind::Success => info!("[状态] {}", message.text),
        }
        self.history.push(message);
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.history.last()
    }

    pub fn history(&self) -> &[StatusMessage] {
        &self.history
    }
}
