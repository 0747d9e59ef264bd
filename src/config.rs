/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// worker 解释器/可执行文件路径
    pub worker_program: String,
    /// worker 入口脚本路径（为空时直接执行 worker_program）
    pub worker_script: String,
    /// 单次 worker 调用的超时时间（秒）
    pub worker_timeout_secs: u64,
    /// 默认导出格式标识
    pub export_format: String,
    /// 非交互模式下的导出目标路径（为空时跳过导出）
    pub export_destination: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_program: "python3".to_string(),
            worker_script: "python/cli.py".to_string(),
            worker_timeout_secs: 300,
            export_format: "tally-xml".to_string(),
            export_destination: String::new(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            worker_program: std::env::var("WORKER_PROGRAM").unwrap_or(default.worker_program),
            worker_script: std::env::var("WORKER_SCRIPT").unwrap_or(default.worker_script),
            worker_timeout_secs: std::env::var("WORKER_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.worker_timeout_secs),
            export_format: std::env::var("EXPORT_FORMAT").unwrap_or(default.export_format),
            export_destination: std::env::var("EXPORT_DESTINATION").unwrap_or(default.export_destination),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
