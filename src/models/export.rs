use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// worker 导出调用的 stdout 载荷
///
/// `success = true` 时 `content` 携带生成的文档全文；
/// `success = false` 时 `message` 说明业务拒绝原因（如不支持的格式）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 一次导出操作的最终结局
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub success: bool,
    /// 成功时的落盘路径
    pub path: Option<PathBuf>,
    pub message: String,
}

impl ExportOutcome {
    /// 内容已写入指定路径
    pub fn saved(path: PathBuf) -> Self {
        let message = format!("Export saved to {}", path.display());
        Self {
            success: true,
            path: Some(path),
            message,
        }
    }
}
