//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量摄取的编排和资源装配。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：装配调用通道、协议客户端和表示边界
//! 2. **批量摄取**：一组文件路径 → 一次 worker 调用 → 逐文件结果
//! 3. **整批语义**：协议无法把失败归因到单个文件，坏一次整批作废
//! 4. **全局统计**：汇总成功/失败文件数和交易条数
//!
//! ## 设计特点
//!
//! - **顶层编排**：不做逐文件重试，也不做部分成功恢复
//! - **资源所有者**：App 是唯一持有 Bridge 的模块
//! - **向下委托**：批量语义委托 WorkerClient，呈现委托 Bridge

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::boundary::Bridge;
use crate::clients::{ProcessWorkerClient, WorkerClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::WorkerInvoker;
use crate::models::{BatchResult, ProcessingResult, Transaction};
use crate::services::{FixedPathDialog, NullDialog, SaveDialog};

/// 批量处理器
///
/// 一组文件路径进，一组逐文件结果出；文件内的失败（status=error）
/// 留在条目里，不升级成整批失败。
pub struct BatchProcessor {
    client: Arc<dyn WorkerClient>,
}

impl BatchProcessor {
    /// 创建新的批量处理器
    pub fn new(client: Arc<dyn WorkerClient>) -> Self {
        Self { client }
    }

    /// 批量处理对账单文件
    ///
    /// # 参数
    /// - `paths`: 输入文件路径，结果与之同序且一一对应
    ///
    /// # 返回
    /// 空输入直接返回空结果，不生成 worker 进程
    pub async fn process_files(&self, paths: &[String]) -> AppResult<BatchResult> {
        if paths.is_empty() {
            info!("输入为空，跳过 worker 调用");
            return Ok(Vec::new());
        }

        info!("📄 开始批量处理 {} 个文件", paths.len());

        let results = self.client.process(paths).await?;

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        info!(
            "✓ 批量处理完成: 成功 {}/{} 个文件",
            succeeded,
            results.len()
        );

        Ok(results)
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    bridge: Bridge,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let invoker = WorkerInvoker::from_config(&config);
        let client: Arc<dyn WorkerClient> = Arc::new(ProcessWorkerClient::new(invoker));

        // 保存对话框协作者：演示二进制没有真实 UI，
        // 配置了导出目标就用固定路径实现，否则视为用户总是取消
        let dialog: Arc<dyn SaveDialog> = if config.export_destination.is_empty() {
            Arc::new(NullDialog)
        } else {
            Arc::new(FixedPathDialog::new(&config.export_destination))
        };

        let bridge = Bridge::new(client, dialog);

        Ok(Self { config, bridge })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, paths: Vec<String>) -> Result<()> {
        if paths.is_empty() {
            warn!("⚠️ 未指定任何对账单文件，程序结束");
            return Ok(());
        }

        // 批量摄取
        let envelope = self.bridge.process_files(&paths).await;
        let results = match envelope.data {
            Some(results) => results,
            None => {
                // 失败已经是信封值，UI 只需要渲染 message
                error!(
                    "❌ 批量处理失败: {}",
                    envelope.message.unwrap_or_default()
                );
                return Ok(());
            }
        };

        for result in &results {
            log_file_result(result, self.config.verbose_logging);
        }

        let stats = collect_stats(&results);

        // 配置了导出目标时，把所有成功文件的交易并成一份走导出流程
        if !self.config.export_destination.is_empty() && stats.transactions > 0 {
            let transactions: Vec<Transaction> = results
                .iter()
                .filter_map(|r| r.transactions.as_ref())
                .flatten()
                .cloned()
                .collect();

            let export = self
                .bridge
                .export_transactions(&transactions, &self.config.export_format)
                .await;

            if export.success {
                info!("📥 {}", export.message);
            } else {
                error!("❌ 导出失败: {}", export.message);
            }
        }

        print_final_stats(&stats);

        Ok(())
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
    transactions: usize,
}

fn collect_stats(results: &[ProcessingResult]) -> ProcessingStats {
    let mut stats = ProcessingStats {
        total: results.len(),
        ..Default::default()
    };

    for result in results {
        if result.is_success() {
            stats.success += 1;
            stats.transactions += result
                .transactions
                .as_ref()
                .map_or(0, Vec::len);
        } else {
            stats.failed += 1;
        }
    }

    stats
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 对账单批量摄取模式");
    info!("📊 worker: {} {}", config.worker_program, config.worker_script);
    info!("{}", "=".repeat(60));
}

fn log_file_result(result: &ProcessingResult, verbose: bool) {
    if result.is_success() {
        info!(
            "✓ {} [{}] {} 条交易",
            result.file,
            result.bank.as_deref().unwrap_or("未识别"),
            result.transaction_count.unwrap_or(0)
        );

        if verbose {
            for txn in result.transactions.iter().flatten() {
                info!(
                    "    {} | {} | 借 {:.2} | 贷 {:.2} | 余额 {:.2}",
                    txn.date.format("%Y-%m-%d"),
                    txn.description,
                    txn.debit,
                    txn.credit,
                    txn.balance
                );
            }
        }
    } else {
        warn!(
            "✗ {}: {}",
            result.file,
            result.message.as_deref().unwrap_or("未说明原因")
        );
    }
}

fn print_final_stats(stats: &ProcessingStats) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("📋 交易总数: {}", stats.transactions);
    info!("{}", "=".repeat(60));
}
