//! 表示边界的信封类型
//!
//! UI 渲染的唯一输入：成功携带 data，失败携带 message，永远不抛错

use serde::{Deserialize, Serialize};

use crate::models::ProcessingResult;

/// 批量处理操作的信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEnvelope {
    pub success: bool,
    /// 成功时的逐文件结果（与输入同序）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ProcessingResult>>,
    /// 失败时的人类可读说明
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProcessEnvelope {
    pub fn ok(data: Vec<ProcessingResult>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// 导出操作的信封（成功与否 message 都在场，成功时说明落盘位置）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub success: bool,
    pub message: String,
}

impl ExportEnvelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
