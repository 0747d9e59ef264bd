/// 导出格式枚举
///
/// 格式标识对 worker 是不透明字符串，本层不做校验、原样透传；
/// 这里的注册表只用来为建议文件名推导扩展名。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Tally 记账软件的 XML 交换格式
    TallyXml,
}

impl ExportFormat {
    /// 获取格式标识（与 worker 约定的字符串）
    pub fn id(self) -> &'static str {
        match self {
            ExportFormat::TallyXml => "tally-xml",
        }
    }

    /// 获取建议文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::TallyXml => "xml",
        }
    }

    /// 从格式标识解析（精确匹配）
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "tally-xml" => Some(ExportFormat::TallyXml),
            _ => None,
        }
    }

    /// 为任意格式标识推导扩展名
    ///
    /// 注册表命中时用注册的扩展名，未知标识取最后一个 `-` 分段兜底
    pub fn extension_for(id: &str) -> String {
        if let Some(format) = Self::from_id(id) {
            return format.extension().to_string();
        }

        id.rsplit('-')
            .find(|segment| !segment.is_empty())
            .unwrap_or("txt")
            .to_string()
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
