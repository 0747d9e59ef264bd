//! # Statement Bridge
//!
//! 银行对账单批量摄取与导出编排层：一组文件路径进，规范化交易列表出；
//! 一组交易进，记账软件交换文档（XML）出。真正的对账单解析由外部 worker
//! 进程完成，本层只通过参数列表、标准流和退出码与它对话。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（子进程生成），只暴露能力
//! - `WorkerInvoker` - 唯一的进程 owner，提供 invoke() 能力
//!
//! ### ② 协议客户端层（Clients）
//! - `clients/` - 封装与 worker 的 JSON 协议，只认识请求/响应形状
//! - `WorkerClient` - process / export 两个调用的 trait 接缝
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `SaveDialog` - 保存位置选择能力（UI 协作者的接缝）
//! - `ArtifactWriter` - 导出产物原样落盘能力
//!
//! ### ④ 编排层（Orchestration）与表示边界（Boundary）
//! - `orchestrator/batch_processor` - 批量摄取编排，管理应用生命周期
//! - `orchestrator/export_processor` - 单次导出的四步流程
//! - `boundary/` - UI 消费的信封接口，失败永远是值、不是异常
//!
//! ## 模块结构

pub mod boundary;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use boundary::{Bridge, ExportEnvelope, ProcessEnvelope};
pub use clients::{ProcessWorkerClient, WorkerClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{WorkerInvoker, WorkerOutput};
pub use models::{BatchResult, ExportOutcome, ProcessingResult, ProcessingStatus, Transaction};
pub use orchestrator::{App, BatchProcessor, ExportProcessor};
