// ==========================================
// IGU 回收碳排放评估 - 计算审计旁路
// ==========================================
// 职责: 记录每一步计算的公式、输入与结果, 以及缺失路线等告警
// 说明: 以 trait 对象注入计算函数, 不使用全局单例
// ==========================================

use crate::domain::ScenarioKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

// ==========================================
// 审计条目
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    Calculation,
    Warning,
}

/// 审计归属 (产品 + 路径)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSubject {
    pub product: String,
    pub scenario: ScenarioKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<AuditSubject>,
    /// 计算上下文 (如 "Transport: origin_to_landfill")
    pub context: String,
    pub formula: String,
    pub variables: Value,
    pub result: f64,
    pub unit: String,
}

impl AuditEntry {
    pub fn calculation(
        context: impl Into<String>,
        formula: impl Into<String>,
        variables: Value,
        result: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level: AuditLevel::Calculation,
            subject: None,
            context: context.into(),
            formula: formula.into(),
            variables,
            result,
            unit: "kgCO2e".to_string(),
        }
    }

    pub fn warning(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level: AuditLevel::Warning,
            subject: None,
            context: context.into(),
            formula: message.into(),
            variables: Value::Null,
            result: 0.0,
            unit: String::new(),
        }
    }
}

// ==========================================
// 审计 Trait
// ==========================================

/// 计算审计记录器
///
/// 实现必须线程安全, 批量并行时共享同一实例
pub trait CalculationAudit: Send + Sync {
    fn record(&self, entry: AuditEntry);

    fn log_calculation(&self, context: &str, formula: &str, variables: Value, result: f64) {
        self.record(AuditEntry::calculation(context, formula, variables, result));
    }

    fn warn(&self, context: &str, message: &str) {
        self.record(AuditEntry::warning(context, message));
    }
}

/// 空操作审计
#[derive(Debug, Clone, Default)]
pub struct NoOpAudit;

impl CalculationAudit for NoOpAudit {
    fn record(&self, _entry: AuditEntry) {}
}

/// 内存审计 (测试与报表汇总)
#[derive(Debug, Default)]
pub struct MemoryAudit {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn warnings(&self) -> Vec<AuditEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == AuditLevel::Warning)
            .collect()
    }
}

impl CalculationAudit for MemoryAudit {
    fn record(&self, entry: AuditEntry) {
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

/// 为条目标注归属后转发
///
/// 并行批量共用一个审计文件时, 据此区分产品与路径
pub struct ScopedAudit<'a> {
    inner: &'a dyn CalculationAudit,
    subject: AuditSubject,
}

impl<'a> ScopedAudit<'a> {
    pub fn new(inner: &'a dyn CalculationAudit, product: impl Into<String>, scenario: ScenarioKind) -> Self {
        Self {
            inner,
            subject: AuditSubject {
                product: product.into(),
                scenario,
            },
        }
    }
}

impl CalculationAudit for ScopedAudit<'_> {
    fn record(&self, mut entry: AuditEntry) {
        if entry.subject.is_none() {
            entry.subject = Some(self.subject.clone());
        }
        self.inner.record(entry);
    }
}

// ==========================================
// 文件审计 (JSON Lines)
// ==========================================

pub struct FileAudit {
    session_id: Uuid,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileAudit {
    /// 在目录下创建 audit_<时间戳>.jsonl
    pub fn create_in<P: AsRef<Path>>(dir: P) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        let file_name = format!("audit_{}.jsonl", Utc::now().format("%Y%m%d_%H%M%S"));
        Self::create(dir.as_ref().join(file_name))
    }

    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let session_id = Uuid::new_v4();
        tracing::info!(path = %path.display(), session = %session_id, "审计文件已创建");
        Ok(Self {
            session_id,
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> std::io::Result<()> {
        match self.writer.lock() {
            Ok(mut w) => w.flush(),
            Err(poisoned) => poisoned.into_inner().flush(),
        }
    }
}

#[derive(Serialize)]
struct SessionLine<'a> {
    session_id: Uuid,
    #[serde(flatten)]
    entry: &'a AuditEntry,
}

impl CalculationAudit for FileAudit {
    fn record(&self, entry: AuditEntry) {
        let line = SessionLine {
            session_id: self.session_id,
            entry: &entry,
        };
        let json = match serde_json::to_string(&line) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "审计条目序列化失败");
                return;
            }
        };

        let mut writer = match self.writer.lock() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(*writer, "{}", json) {
            tracing::error!(error = %e, path = %self.path.display(), "审计文件写入失败");
        }
    }
}

impl Drop for FileAudit {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::error!(error = %e, "审计文件刷新失败");
        }
    }
}
