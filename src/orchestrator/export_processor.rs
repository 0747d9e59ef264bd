//! 导出处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责一次完整导出的四步流程，是导出级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **选择目标**：通过保存对话框协作者确定落盘路径
//! 2. **生成文档**：把交易列表经标准输入交给 worker
//! 3. **解释响应**：区分进程级失败与 worker 的业务拒绝
//! 4. **落盘**：把 content 原样写入目标文件

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::WorkerClient;
use crate::error::{AppError, AppResult, ExportError};
use crate::models::{ExportOutcome, Transaction};
use crate::services::{suggested_file_name, ArtifactWriter, SaveDialog};

/// 导出处理器
pub struct ExportProcessor {
    client: Arc<dyn WorkerClient>,
    writer: ArtifactWriter,
}

impl ExportProcessor {
    /// 创建新的导出处理器
    pub fn new(client: Arc<dyn WorkerClient>) -> Self {
        Self {
            client,
            writer: ArtifactWriter::new(),
        }
    }

    /// 执行一次导出
    ///
    /// # 参数
    /// - `transactions`: 待导出的交易序列，原样传给 worker
    /// - `format`: 格式标识，不透明透传
    /// - `dialog`: 保存对话框协作者
    ///
    /// # 返回
    /// 成功时返回带落盘路径的结局；取消、业务拒绝、进程失败、写盘失败都走错误通道
    pub async fn export_transactions(
        &self,
        transactions: &[Transaction],
        format: &str,
        dialog: &dyn SaveDialog,
    ) -> AppResult<ExportOutcome> {
        info!(
            "📤 开始导出 {} 条交易 (格式: {})",
            transactions.len(),
            format
        );

        // ========== 步骤 1: 选择保存位置 ==========
        // 取消要在任何子进程工作之前发现，不白跑 worker
        let suggested = suggested_file_name(format);
        let destination = match dialog.pick_save_path(&suggested).await {
            Some(path) => path,
            None => {
                info!("用户取消了保存对话框，未调用 worker");
                return Err(ExportError::Cancelled.into());
            }
        };

        // ========== 步骤 2: 调用 worker 生成文档 ==========
        let response = self.client.export(transactions, format).await?;

        // ========== 步骤 3: 解释响应 ==========
        // worker 的业务拒绝（载荷里 success=false）不同于进程级失败，不写任何文件
        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "worker 未说明拒绝原因".to_string());
            warn!("worker 拒绝导出: {}", message);
            return Err(ExportError::RejectedByWorker { message }.into());
        }

        let content = match response.content {
            Some(content) => content,
            None => return Err(AppError::Other("导出响应缺少 content 字段".to_string())),
        };

        // ========== 步骤 4: 写入目标文件 ==========
        self.writer.write(&destination, &content).await?;

        let outcome = ExportOutcome::saved(destination);
        info!("✓ {}", outcome.message);
        Ok(outcome)
    }
}
