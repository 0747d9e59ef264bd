use serde::{Deserialize, Serialize};

use crate::models::transaction::Transaction;

/// 单个文件的处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Success,
    Error,
}

/// 单个输入文件的处理结果
///
/// 不变量（由 worker 保证，本层测试断言）：
/// - `status = success` 时 `transactions` 必定存在（可以为空）
/// - `status = error` 时 `message` 必定存在且 `transactions` 缺省
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// 原始输入路径/文件名
    pub file: String,
    pub status: ProcessingStatus,
    /// 识别出的银行标识
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_count: Option<usize>,
    /// 交易序列，顺序 = 对账单顺序
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    /// status = error 时的人类可读错误说明
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProcessingResult {
    pub fn is_success(&self) -> bool {
        self.status == ProcessingStatus::Success
    }
}

/// 一次批量调用的完整结果：每个输入路径一条，与输入同序，失败文件也不丢条目
pub type BatchResult = Vec<ProcessingResult>;
