//! Worker 协议客户端
//!
//! 封装与外部解析 worker 的 JSON 协议：组装参数列表、解析响应形状。
//! 传输层（今天是进程生成）藏在 trait 背后，换成 socket/HTTP 不动调用方。

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::infrastructure::WorkerInvoker;
use crate::models::{ExportResponse, ProcessingResult, Transaction};

/// 批量处理子命令
const PROCESS_COMMAND: &str = "process";
/// 导出子命令
const EXPORT_COMMAND: &str = "export";
/// 导出格式参数
const FORMAT_FLAG: &str = "--format";

/// 协议层解析错误（退出码为 0 但 stdout 不符合约定时的具体原因）
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("不是合法的 JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("结果条目数与输入不符: 输入 {expected} 个文件, 返回 {actual} 条")]
    CountMismatch { expected: usize, actual: usize },

    #[error("导出响应标记成功但缺少 content 字段")]
    MissingContent,
}

/// Worker 客户端能力
///
/// 职责：
/// - process: 一组文件路径 → 逐文件处理结果
/// - export: 交易列表 + 格式标识 → worker 的原始导出响应
/// - 不解释导出响应里的业务 success 标志（那是编排层的事）
#[async_trait]
pub trait WorkerClient: Send + Sync {
    /// 批量处理对账单文件
    async fn process(&self, paths: &[String]) -> AppResult<Vec<ProcessingResult>>;

    /// 请求 worker 生成导出文档
    async fn export(
        &self,
        transactions: &[Transaction],
        format: &str,
    ) -> AppResult<ExportResponse>;
}

/// 基于子进程通道的 worker 客户端
pub struct ProcessWorkerClient {
    invoker: WorkerInvoker,
}

impl ProcessWorkerClient {
    /// 创建新的客户端
    pub fn new(invoker: WorkerInvoker) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl WorkerClient for ProcessWorkerClient {
    async fn process(&self, paths: &[String]) -> AppResult<Vec<ProcessingResult>> {
        // 调用形状: <worker> process <path1> <path2> ... 无标准输入
        let mut args = Vec::with_capacity(paths.len() + 1);
        args.push(PROCESS_COMMAND.to_string());
        args.extend_from_slice(paths);

        let output = self.invoker.invoke(&args, None).await?;
        let raw = output.stdout_text();

        let results: Vec<ProcessingResult> = serde_json::from_str(&raw)
            .map_err(|e| AppError::worker_output_malformed(&raw, ProtocolError::Json(e)))?;

        // 协议保证逐文件 1:1 对应，条目数对不上说明输出已经不可信
        if results.len() != paths.len() {
            return Err(AppError::worker_output_malformed(
                &raw,
                ProtocolError::CountMismatch {
                    expected: paths.len(),
                    actual: results.len(),
                },
            ));
        }

        debug!("worker 返回 {} 条处理结果", results.len());
        Ok(results)
    }

    async fn export(
        &self,
        transactions: &[Transaction],
        format: &str,
    ) -> AppResult<ExportResponse> {
        // 调用形状: <worker> export --format <id> 标准输入 = 交易 JSON 数组
        let payload = serde_json::to_vec(transactions)?;
        let args = vec![
            EXPORT_COMMAND.to_string(),
            FORMAT_FLAG.to_string(),
            format.to_string(),
        ];

        let output = self.invoker.invoke(&args, Some(&payload)).await?;
        let raw = output.stdout_text();

        let response: ExportResponse = serde_json::from_str(&raw)
            .map_err(|e| AppError::worker_output_malformed(&raw, ProtocolError::Json(e)))?;

        if response.success && response.content.is_none() {
            return Err(AppError::worker_output_malformed(
                &raw,
                ProtocolError::MissingContent,
            ));
        }

        Ok(response)
    }
}
