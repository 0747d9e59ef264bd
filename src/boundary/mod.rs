//! 表示边界（Presentation Boundary）
//!
//! UI 了解失败的唯一通道。两个操作都返回打了标签的信封值，
//! 任何 AppError 都在这里被转换，绝不穿透到 UI 层。

pub mod envelope;

pub use envelope::{ExportEnvelope, ProcessEnvelope};

use std::sync::Arc;

use tracing::{error, info};

use crate::clients::WorkerClient;
use crate::error::{AppError, ExportError};
use crate::models::Transaction;
use crate::orchestrator::{BatchProcessor, ExportProcessor};
use crate::services::SaveDialog;

/// 表示边界
///
/// 职责：
/// - 暴露 process_files / export_transactions 两个操作
/// - 把错误通道整流成信封值（UI 只渲染 message，不处理异常）
/// - 持有保存对话框协作者的只读句柄
pub struct Bridge {
    batch: BatchProcessor,
    export: ExportProcessor,
    dialog: Arc<dyn SaveDialog>,
}

impl Bridge {
    /// 创建新的表示边界
    pub fn new(client: Arc<dyn WorkerClient>, dialog: Arc<dyn SaveDialog>) -> Self {
        Self {
            batch: BatchProcessor::new(client.clone()),
            export: ExportProcessor::new(client),
            dialog,
        }
    }

    /// 批量处理一组对账单文件
    ///
    /// 逐文件的 status=error 留在成功信封里，只有整批失败
    /// （进程崩溃、输出不可解析）才变成失败信封
    pub async fn process_files(&self, paths: &[String]) -> ProcessEnvelope {
        match self.batch.process_files(paths).await {
            Ok(results) => ProcessEnvelope::ok(results),
            Err(e) => {
                error!("批量处理失败: {}", e);
                ProcessEnvelope::fail(failure_message(&e))
            }
        }
    }

    /// 导出一组交易
    pub async fn export_transactions(
        &self,
        transactions: &[Transaction],
        format: &str,
    ) -> ExportEnvelope {
        match self
            .export
            .export_transactions(transactions, format, self.dialog.as_ref())
            .await
        {
            Ok(outcome) => ExportEnvelope::ok(outcome.message),
            Err(AppError::Export(ExportError::Cancelled)) => {
                // 取消是正常结局，不按故障记日志
                info!("导出已取消");
                ExportEnvelope::fail("Export cancelled")
            }
            Err(e) => {
                error!("导出失败: {}", e);
                ExportEnvelope::fail(failure_message(&e))
            }
        }
    }
}

/// 给 UI 的失败文案：取消和业务拒绝用约定的原话，其余用错误的完整描述
fn failure_message(err: &AppError) -> String {
    match err {
        AppError::Export(ExportError::Cancelled) => "Export cancelled".to_string(),
        AppError::Export(ExportError::RejectedByWorker { message }) => message.clone(),
        other => other.to_string(),
    }
}
