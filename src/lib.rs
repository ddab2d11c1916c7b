//! # Answer Key Submit
//!
//! 多版本试卷答案键（gabarito）的录入、组装和提交客户端
//!
//! ## 架构设计
//!
//! ### ① 数据模型层（Models）
//! - `models/` - 答案键结构（与服务器约定的 JSON 字段）和表单填写文件
//!
//! ### ② 表单层（Form）
//! - `form/` - 无界面的表单模型
//! - `FormBuilder` - 按试卷类型数量生成 N × 10 题的控件
//! - `FieldRegistry` - (试卷类型, 题号, 字段角色) → 控件
//!
//! ### ③ 业务能力层（Services / Clients）
//! - `services/payload` - 从控件重建答案键并组装 multipart 请求体
//! - `services/download_writer` - 保存服务器返回的文件
//! - `clients/upload_client` - `/upload` 与模板下载接口
//!
//! ### ④ 流程层（Workflow）
//! - `SubmissionController` - 一次提交的完整流程和结果分派
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{UploadClient, UploadOutcome};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use form::{CorrectionForm, FormBuilder};
pub use models::{AnswerKeyEntry, ChoiceLabel, ExamAnswerKey, QuestionKey};
pub use workflow::{SubmissionController, SubmissionResult};
