//! 保存对话框能力 - 业务能力层
//!
//! 导出编排器需要一个"让用户挑保存位置"的协作者。真实 UI 把系统对话框
//! 接在这个 trait 上；句柄显式传入而不是读进程级全局状态，测试可以换假实现。

use std::path::PathBuf;

use async_trait::async_trait;

use crate::models::ExportFormat;

/// 保存位置选择能力
///
/// 返回 None 表示用户取消
#[async_trait]
pub trait SaveDialog: Send + Sync {
    /// 让用户为导出文件挑一个保存位置
    ///
    /// # 参数
    /// - `suggested_name`: 预填的建议文件名
    ///
    /// # 返回
    /// 用户确认的完整路径，取消时为 None
    async fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf>;
}

/// 非交互的固定路径实现
///
/// 目标是目录时在其下用建议文件名，否则原样作为目标文件
pub struct FixedPathDialog {
    destination: PathBuf,
}

impl FixedPathDialog {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

#[async_trait]
impl SaveDialog for FixedPathDialog {
    async fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
        if self.destination.is_dir() {
            Some(self.destination.join(suggested_name))
        } else {
            Some(self.destination.clone())
        }
    }
}

/// 总是取消的实现（未配置导出目标时使用）
pub struct NullDialog;

#[async_trait]
impl SaveDialog for NullDialog {
    async fn pick_save_path(&self, _suggested_name: &str) -> Option<PathBuf> {
        None
    }
}

/// 生成带当前日期的建议文件名，扩展名从格式标识推导
pub fn suggested_file_name(format: &str) -> String {
    format!(
        "statement_export_{}.{}",
        chrono::Local::now().format("%Y-%m-%d"),
        ExportFormat::extension_for(format)
    )
}
