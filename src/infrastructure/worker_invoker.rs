//! Worker 调用通道 - 基础设施层
//!
//! 持有唯一的子进程生成能力，只暴露 invoke()

use std::process::Stdio;
use std::time::Duration;

use futures::future::try_join;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::utils::logging::truncate_text;

/// 一次 worker 调用捕获到的全部产物
#[derive(Debug, Clone)]
pub struct WorkerOutput {
    /// 子进程退出码（被信号终止时为 None）
    pub exit_code: Option<i32>,
    /// 标准输出字节，按产生顺序拼接
    pub stdout: Vec<u8>,
    /// 标准错误字节，单独拼接
    pub stderr: Vec<u8>,
}

impl WorkerOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Worker 调用通道
///
/// 职责：
/// - 每次调用生成恰好一个短生命周期子进程
/// - 参数按离散 token 传递，不经过 shell（文件名里的空格/元字符不会被展开）
/// - stdin 写入与 stdout/stderr 排空并发进行，避免管道互相堵死
/// - 只在子进程终止后完成
/// - 不认识 Transaction / ProcessingResult
pub struct WorkerInvoker {
    program: String,
    script: String,
    timeout: Duration,
}

impl WorkerInvoker {
    /// 创建新的调用通道
    ///
    /// # 参数
    /// - `program`: 解释器/可执行文件路径
    /// - `script`: 入口脚本路径，为空时直接执行 program
    /// - `timeout`: 单次调用的超时时间
    pub fn new(program: impl Into<String>, script: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
            timeout,
        }
    }

    /// 从配置创建
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.worker_program,
            &config.worker_script,
            Duration::from_secs(config.worker_timeout_secs),
        )
    }

    /// 调用 worker 并等待其终止
    ///
    /// # 参数
    /// - `args`: 完整位置参数列表，原样传递
    /// - `stdin_payload`: 可选的标准输入载荷，写完后关闭输入流示意 EOF
    ///
    /// # 返回
    /// 退出码为 0 时返回捕获的输出；非零退出、超时、启动失败都映射为错误
    pub async fn invoke(
        &self,
        args: &[String],
        stdin_payload: Option<&[u8]>,
    ) -> AppResult<WorkerOutput> {
        debug!(
            "调用 worker: {} {} {:?} (stdin: {} 字节)",
            self.program,
            self.script,
            args,
            stdin_payload.map_or(0, |b| b.len())
        );

        let mut cmd = Command::new(&self.program);
        if !self.script.is_empty() {
            cmd.arg(&self.script);
        }
        cmd.args(args)
            .stdin(if stdin_payload.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| AppError::worker_spawn_failed(&self.program, e))?;

        let stdin_handle = child.stdin.take();
        let payload = stdin_payload.map(|b| b.to_vec());

        // 写入端与排空端必须并发推进：worker 可能在读完 stdin 之前就开始
        // 写 stdout，顺序执行会在管道缓冲区填满时互相等死
        let write_input = async {
            if let (Some(mut stdin), Some(bytes)) = (stdin_handle, payload) {
                if let Err(e) = stdin.write_all(&bytes).await {
                    // worker 未读完输入就退出时会走到这里，退出状态自会说明问题
                    warn!("写入 worker stdin 失败: {}", e);
                }
            }
            Ok::<(), AppError>(())
        };

        let collect_output = async {
            child
                .wait_with_output()
                .await
                .map_err(|e| AppError::worker_process_failed(None, format!("等待 worker 退出失败: {}", e)))
        };

        let (_, output) = tokio::time::timeout(self.timeout, try_join(write_input, collect_output))
            .await
            .map_err(|_| {
                AppError::worker_process_failed(
                    None,
                    format!("worker 超过 {} 秒未退出，已被终止", self.timeout.as_secs()),
                )
            })??;

        let exit_code = output.status.code();
        let stderr_text = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(AppError::worker_process_failed(
                exit_code,
                stderr_text.into_owned(),
            ));
        }

        // 成功退出也要把 stderr 暴露出来，里面常有 worker 的诊断信息
        if !output.stderr.is_empty() {
            warn!("worker stderr: {}", truncate_text(&stderr_text, 500));
        }

        debug!("worker 正常退出, stdout {} 字节", output.stdout.len());

        Ok(WorkerOutput {
            exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
