//! 导出产物写入服务 - 业务能力层
//!
//! 只负责"把生成的文档落盘"能力，不关心流程

use std::path::Path;

use tracing::debug;

use crate::error::{AppError, AppResult};

/// 导出产物写入服务
///
/// 职责：
/// - 把 worker 生成的文档内容逐字节写到目标路径
/// - 不做任何转码、不动行尾
/// - 不认识 Transaction，也不关心内容是不是 XML
#[derive(Debug, Default)]
pub struct ArtifactWriter;

impl ArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    /// 写入导出内容
    ///
    /// # 参数
    /// - `path`: 目标路径
    /// - `content`: worker 返回的文档全文
    ///
    /// # 返回
    /// 文件系统失败（权限、磁盘满）映射为导出写入错误
    pub async fn write(&self, path: &Path, content: &str) -> AppResult<()> {
        debug!("写入导出文件: {} ({} 字节)", path.display(), content.len());

        tokio::fs::write(path, content.as_bytes())
            .await
            .map_err(|e| AppError::export_write_failed(path.display().to_string(), e))?;

        Ok(())
    }
}
