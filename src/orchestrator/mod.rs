//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量摄取与导出两条流程的调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 一组路径 → 一次 worker 调用 → 逐文件结果（Vec<ProcessingResult>）
//! - 整批语义：协议无法逐文件归因，坏一次整批作废
//!
//! ### `export_processor` - 导出处理器
//! - 单次导出的四步流程（选目标 → 生成 → 解释 → 落盘）
//! - 区分用户取消、业务拒绝、进程失败、写盘失败
//!
//! ## 层次关系
//!
//! ```text
//! boundary::Bridge (信封转换)
//!     ↓
//! batch_processor / export_processor (流程编排)
//!     ↓
//! clients::WorkerClient (JSON 协议)
//!     ↓
//! services (能力层：save_dialog / artifact_writer)
//!     ↓
//! infrastructure (基础设施：WorkerInvoker)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管摄取，export_processor 管导出
//! 2. **向下依赖**：编排层 → clients → infrastructure
//! 3. **无业务解析**：对账单怎么读是 worker 的事，这里只做调度和聚合

pub mod batch_processor;
pub mod export_processor;

pub use batch_processor::{App, BatchProcessor};
pub use export_processor::ExportProcessor;
