use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// 规范化交易记录
///
/// worker 对任意来源的对账单（PDF/图片/CSV/表格）解析后输出的统一形状。
/// 本层只负责原样传递，不校验 balance 的正确性。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 交易日期
    #[serde(with = "worker_datetime")]
    pub date: NaiveDateTime,
    /// 摘要
    pub description: String,
    /// 借方金额（非负）
    pub debit: f64,
    /// 贷方金额（非负）
    pub credit: f64,
    /// 交易后的账户余额（有符号）
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    #[serde(
        default,
        with = "worker_datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_date: Option<NaiveDateTime>,
}

impl Transaction {
    /// 一条交易要么是借方要么是贷方，两者至多一个非零。
    /// 本层信任 worker 的输出，不强制该不变量，测试用它做断言。
    pub fn is_single_sided(&self) -> bool {
        self.debit == 0.0 || self.credit == 0.0
    }
}

/// 解析 worker 输出的日期字符串
///
/// worker 用 Python 的 `datetime.isoformat()` 输出（如 `2025-01-15T00:00:00`），
/// 但上游偶尔只给裸日期（如 `2024-01-01`），两种都接受。
fn parse_worker_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
}

/// 序列化回 `isoformat()` 兼容形状，保证 worker 的 `fromisoformat` 能读回去
fn format_worker_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

mod worker_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_worker_datetime(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_worker_datetime(&s).map_err(serde::de::Error::custom)
    }
}

mod worker_datetime_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&super::format_worker_datetime(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        opt.map(|s| super::parse_worker_datetime(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
