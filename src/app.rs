use crate::config::Config;
use crate::form::CorrectionForm;
use crate::models::loaders::load_form_fill_or_default;
use crate::utils::logging::{append_log_line, init_log_file, log_outcome, log_startup};
use crate::workflow::{SubmissionController, SubmissionResult};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    controller: SubmissionController,
}

impl App {
    /// 初始化应用：读取表单文件、生成表单、创建客户端
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置无效")?;

        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        let fill = load_form_fill_or_default(Path::new(&config.form_file)).await?;
        let (form, applied) = CorrectionForm::from_fill(&fill, &config.default_exam_types);

        log_startup(
            &config.endpoint(&config.upload_path),
            form.exam_type_count_text(),
        );
        info!(
            "✓ 表单已生成: {} 个试卷类型, 已填入 {} 个答案",
            form.answers().exam_type_count(),
            applied
        );

        let controller = SubmissionController::from_config(&config, form)?;

        Ok(Self { config, controller })
    }

    /// 运行应用主逻辑
    pub async fn run(mut self) -> Result<SubmissionResult> {
        if let Some(name) = self.config.template_name.clone() {
            let template = self.controller.fetch_template(&name).await?;
            if !template.is_success() {
                warn!("⚠️ 模板 {} 下载失败，继续提交", name);
            }
        }

        if self.controller.form().images().is_empty() {
            warn!("⚠️ 没有选择答题卡图片，服务器可能会拒绝");
        }

        let submitted = self.controller.submit().await;

        // 失败时状态区已经是 "Erro: ..."，先写入日志再返回错误
        if let Some(message) = self.controller.status().current() {
            append_log_line(&self.config.output_log_file, &message.text)?;
        }
        let result = submitted?;
        log_outcome(&result, &self.config.output_log_file);

        Ok(result)
    }
}
