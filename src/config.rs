use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 阅卷服务器地址
    pub server_base_url: String,
    /// 上传答题卡的接口路径
    pub upload_path: String,
    /// 下载空白答题卡模板的接口路径
    pub template_path: String,
    /// 需要下载的模板文件名（为空则不下载）
    pub template_name: Option<String>,
    /// 结果文件保存目录
    pub download_dir: String,
    /// 表单填写文件（TOML）
    pub form_file: String,
    /// 试卷类型数量的初始值
    pub default_exam_types: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_base_url: "http://127.0.0.1:5000".to_string(),
            upload_path: "/upload".to_string(),
            template_path: "/download_template".to_string(),
            template_name: None,
            download_dir: "downloads".to_string(),
            form_file: "answer_key.toml".to_string(),
            default_exam_types: "1".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            server_base_url: std::env::var("SERVER_BASE_URL").unwrap_or(default.server_base_url),
            upload_path: std::env::var("UPLOAD_PATH").unwrap_or(default.upload_path),
            template_path: std::env::var("TEMPLATE_PATH").unwrap_or(default.template_path),
            template_name: std::env::var("TEMPLATE_NAME").ok().filter(|v| !v.trim().is_empty()),
            download_dir: std::env::var("DOWNLOAD_DIR").unwrap_or(default.download_dir),
            form_file: std::env::var("FORM_FILE").unwrap_or(default.form_file),
            default_exam_types: std::env::var("DEFAULT_EXAM_TYPES").unwrap_or(default.default_exam_types),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 以指定服务器地址创建配置（其余取默认值）
    pub fn with_server(base_url: impl Into<String>) -> Self {
        Self {
            server_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// 检查地址与路径格式
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.server_base_url.clone(),
            });
        }
        for (name, value) in [
            ("UPLOAD_PATH", &self.upload_path),
            ("TEMPLATE_PATH", &self.template_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::InvalidPath {
                    name,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// 拼接完整的接口地址
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_base_url.trim().trim_end_matches('/'), path)
    }
}
