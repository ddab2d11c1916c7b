use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 服务器请求相关错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 表单状态错误
    #[error("表单错误: {0}")]
    Form(#[from] FormError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 服务器请求相关错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 创建 HTTP 客户端失败
    #[error("创建HTTP客户端失败: {source}")]
    ClientBuildFailed {
        #[source]
        source: reqwest::Error,
    },
    /// 构建请求体失败
    #[error("构建请求体失败 ({endpoint}): {source}")]
    RequestBuildFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败: {source}")]
    JsonEncodeFailed {
        #[source]
        source: serde_json::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 表单状态错误
#[derive(Debug, Error)]
pub enum FormError {
    /// 没有对应的控件
    #[error("找不到表单字段: {field}")]
    FieldNotFound { field: String },
    /// 控件类型与操作不符
    #[error("字段 {field} 不是{expected}")]
    WrongControl {
        field: String,
        expected: &'static str,
    },
    /// 权重不是有限数值
    #[error("字段 {field} 的权重无效: {value}")]
    InvalidWeight { field: String, value: f64 },
    /// 无法识别的选项
    #[error("无效的选项: '{value}' (应为 A-E)")]
    InvalidChoice { value: String },
    /// 无法识别的题号
    #[error("无效的题号: '{value}' (应为 Q1-Q10)")]
    InvalidQuestionKey { value: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 服务器地址格式错误
    #[error("服务器地址无效: '{value}' (必须以 http:// 或 https:// 开头)")]
    InvalidBaseUrl { value: String },
    /// 路径格式错误
    #[error("配置项 {name} 的路径无效: '{value}' (必须以 / 开头)")]
    InvalidPath { name: &'static str, value: String },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonEncodeFailed { source: err })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
