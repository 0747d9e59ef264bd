use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// Worker 进程相关错误
    Worker(WorkerError),
    /// 导出流程错误
    Export(ExportError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Worker(e) => write!(f, "Worker错误: {}", e),
            AppError::Export(e) => write!(f, "导出错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Worker(e) => Some(e),
            AppError::Export(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// Worker 进程相关错误
#[derive(Debug)]
pub enum WorkerError {
    /// 启动子进程失败
    SpawnFailed {
        program: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 子进程以非零状态退出（包含启动后超时被终止的情况）
    ProcessFailed {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// 子进程退出码为 0，但 stdout 不是约定的 JSON 形状
    OutputMalformed {
        raw_stdout: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::SpawnFailed { program, source } => {
                write!(f, "无法启动 worker 进程 ({}): {}", program, source)
            }
            WorkerError::ProcessFailed { exit_code, stderr } => {
                write!(
                    f,
                    "worker 进程失败 (exit code: {}): {}",
                    exit_code.map_or_else(|| "无".to_string(), |c| c.to_string()),
                    stderr
                )
            }
            WorkerError::OutputMalformed { raw_stdout, source } => {
                write!(
                    f,
                    "worker 输出解析失败: {} (原始输出: {})",
                    source, raw_stdout
                )
            }
        }
    }
}

impl std::error::Error for WorkerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkerError::SpawnFailed { source, .. }
            | WorkerError::OutputMalformed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            WorkerError::ProcessFailed { .. } => None,
        }
    }
}

/// 导出流程错误
#[derive(Debug)]
pub enum ExportError {
    /// 用户在保存对话框中取消了导出（正常结局，不是故障）
    Cancelled,
    /// worker 进程运行成功，但在载荷中报告业务拒绝（如不支持的格式）
    RejectedByWorker {
        message: String,
    },
    /// 生成内容写入本地文件系统失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Cancelled => write!(f, "Export cancelled"),
            ExportError::RejectedByWorker { message } => {
                write!(f, "worker 拒绝导出: {}", message)
            }
            ExportError::WriteFailed { path, source } => {
                write!(f, "写入导出文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========

impl From<WorkerError> for AppError {
    fn from(err: WorkerError) -> Self {
        AppError::Worker(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON 序列化失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建启动子进程失败错误
    pub fn worker_spawn_failed(
        program: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Worker(WorkerError::SpawnFailed {
            program: program.into(),
            source: Box::new(source),
        })
    }

    /// 创建子进程失败错误
    pub fn worker_process_failed(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        AppError::Worker(WorkerError::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        })
    }

    /// 创建 worker 输出解析失败错误
    pub fn worker_output_malformed(
        raw_stdout: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Worker(WorkerError::OutputMalformed {
            raw_stdout: raw_stdout.into(),
            source: Box::new(source),
        })
    }

    /// 创建导出文件写入失败错误
    pub fn export_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Export(ExportError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
