//! 端到端集成测试
//!
//! 用 /bin/sh 存根脚本顶替真实的解析 worker（部署形态是
//! `<python> <cli.py> ...`，这里对应 `/bin/sh <stub.sh> ...`），
//! 走真实的子进程通道验证协议两端的契约。

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use statement_bridge::boundary::Bridge;
use statement_bridge::clients::{ProcessWorkerClient, WorkerClient};
use statement_bridge::error::{AppError, WorkerError};
use statement_bridge::infrastructure::WorkerInvoker;
use statement_bridge::models::{ProcessingStatus, Transaction};
use statement_bridge::orchestrator::BatchProcessor;
use statement_bridge::services::{FixedPathDialog, NullDialog};
use statement_bridge::utils::logging;
use tokio_test::assert_ok;

/// 把存根脚本写进临时目录，返回脚本路径
fn write_stub(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("写入存根脚本失败");
    path.to_string_lossy().into_owned()
}

fn invoker_for(stub: &str) -> WorkerInvoker {
    WorkerInvoker::new("/bin/sh", stub, Duration::from_secs(10))
}

fn client_for(stub: &str) -> Arc<dyn WorkerClient> {
    Arc::new(ProcessWorkerClient::new(invoker_for(stub)))
}

/// 逐参数回显一条成功结果的 process 存根
const ECHO_PROCESS_STUB: &str = r#"cmd="$1"; shift
if [ "$cmd" != "process" ]; then echo "unknown command: $cmd" >&2; exit 2; fi
printf '['
sep=""
for f in "$@"; do
  printf '%s{"file":"%s","status":"success","bank":"STUB","transaction_count":1,"transactions":[{"date":"2024-01-01T00:00:00","description":"seed txn","debit":100.0,"credit":0.0,"balance":5000.0,"reference_no":"R-1","value_date":null}]}' "$sep" "$f"
  sep=","
done
printf ']'
"#;

#[tokio::test]
async fn batch_returns_one_result_per_path_in_order() {
    logging::init();
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "worker.sh", ECHO_PROCESS_STUB);

    let paths = vec![
        "c.pdf".to_string(),
        "a.csv".to_string(),
        "b.xlsx".to_string(),
    ];
    let results = assert_ok!(BatchProcessor::new(client_for(&stub)).process_files(&paths).await);

    assert_eq!(results.len(), 3);
    let files: Vec<&str> = results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["c.pdf", "a.csv", "b.xlsx"]);
    for result in &results {
        assert_eq!(result.status, ProcessingStatus::Success);
        let txns = result.transactions.as_ref().expect("成功条目必须带 transactions");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].reference_no.as_deref(), Some("R-1"));
        assert!(txns[0].is_single_sided());
    }
}

#[tokio::test]
async fn repeated_batches_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "worker.sh", ECHO_PROCESS_STUB);
    let processor = BatchProcessor::new(client_for(&stub));

    let paths = vec!["a.csv".to_string(), "b.csv".to_string()];
    let first = assert_ok!(processor.process_files(&paths).await);
    let second = assert_ok!(processor.process_files(&paths).await);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn per_file_errors_stay_inside_a_successful_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(
        dir.path(),
        "worker.sh",
        r#"printf '[{"file":"a.csv","status":"success","bank":"STUB","transaction_count":0,"transactions":[]},{"file":"b.pdf","status":"error","message":"Unsupported file type"}]'
"#,
    );
    let bridge = Bridge::new(client_for(&stub), Arc::new(NullDialog));

    let envelope = bridge
        .process_files(&["a.csv".to_string(), "b.pdf".to_string()])
        .await;

    assert!(envelope.success);
    let results = envelope.data.unwrap();
    assert_eq!(results[0].status, ProcessingStatus::Success);
    assert_eq!(results[0].transactions.as_deref(), Some(&[][..]));
    assert_eq!(results[1].status, ProcessingStatus::Error);
    assert_eq!(results[1].message.as_deref(), Some("Unsupported file type"));
    assert_eq!(results[1].transactions, None);
}

#[tokio::test]
async fn nonzero_exit_surfaces_stderr_in_failure_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "worker.sh", "echo \"bad file\" >&2\nexit 1\n");
    let bridge = Bridge::new(client_for(&stub), Arc::new(NullDialog));

    let envelope = bridge.process_files(&["a.pdf".to_string()]).await;

    assert!(!envelope.success);
    assert_eq!(envelope.data, None);
    let message = envelope.message.unwrap();
    assert!(message.contains("bad file"), "信封要携带 stderr: {}", message);
    assert!(message.contains('1'), "信封要携带退出码: {}", message);
}

#[tokio::test]
async fn garbage_stdout_surfaces_raw_output_in_failure_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "worker.sh", "printf 'not json'\n");
    let bridge = Bridge::new(client_for(&stub), Arc::new(NullDialog));

    let envelope = bridge.process_files(&["a.pdf".to_string()]).await;

    assert!(!envelope.success);
    let message = envelope.message.unwrap();
    assert!(message.contains("not json"), "信封要携带原始输出: {}", message);
    assert!(message.contains("解析"), "信封要说明是解析失败: {}", message);
}

#[tokio::test]
async fn result_count_mismatch_is_malformed_output() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "worker.sh", "printf '[]'\n");

    let err = BatchProcessor::new(client_for(&stub))
        .process_files(&["a.csv".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Worker(WorkerError::OutputMalformed { .. })
    ));
}

#[tokio::test]
async fn empty_batch_skips_the_worker_entirely() {
    let dir = tempfile::tempdir().unwrap();
    // 这个存根一旦被调用就失败，空输入必须根本不走到它
    let stub = write_stub(dir.path(), "worker.sh", "exit 3\n");

    let results = assert_ok!(
        BatchProcessor::new(client_for(&stub)).process_files(&[]).await
    );
    assert!(results.is_empty());
}

#[tokio::test]
async fn hung_worker_is_terminated_as_process_failure() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "worker.sh", "sleep 30\n");
    let invoker = WorkerInvoker::new("/bin/sh", stub, Duration::from_secs(1));
    let client: Arc<dyn WorkerClient> = Arc::new(ProcessWorkerClient::new(invoker));

    let err = BatchProcessor::new(client)
        .process_files(&["a.csv".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Worker(WorkerError::ProcessFailed { exit_code: None, .. })
    ));
}

#[tokio::test]
async fn large_stdin_payload_does_not_deadlock() {
    let dir = tempfile::tempdir().unwrap();
    // cat 把 stdin 原样倒回 stdout，载荷远大于管道缓冲区，
    // 只有写入端和排空端并发推进才能跑完
    let stub = write_stub(dir.path(), "worker.sh", "cat\n");
    let payload = vec![b'x'; 1_000_000];

    let output = assert_ok!(
        invoker_for(&stub)
            .invoke(&["export".to_string()], Some(&payload))
            .await
    );
    assert_eq!(output.stdout, payload);
}

#[tokio::test]
async fn export_writes_exact_worker_content() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("ledger.xml");
    let stub = write_stub(
        dir.path(),
        "worker.sh",
        "cat > /dev/null\nprintf '{\"success\":true,\"content\":\"<xml/>\"}'\n",
    );
    let bridge = Bridge::new(
        client_for(&stub),
        Arc::new(FixedPathDialog::new(&dest)),
    );

    let txns = vec![sample_transaction()];
    let envelope = bridge.export_transactions(&txns, "tally-xml").await;

    assert!(envelope.success, "导出应该成功: {}", envelope.message);
    assert_eq!(envelope.message, format!("Export saved to {}", dest.display()));
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "<xml/>");
}

#[tokio::test]
async fn export_to_directory_uses_dated_suggested_name() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();
    let stub = write_stub(
        dir.path(),
        "worker.sh",
        "cat > /dev/null\nprintf '{\"success\":true,\"content\":\"<xml/>\"}'\n",
    );
    let bridge = Bridge::new(
        client_for(&stub),
        Arc::new(FixedPathDialog::new(&out_dir)),
    );

    let envelope = bridge.export_transactions(&[sample_transaction()], "tally-xml").await;
    assert!(envelope.success);

    let entries: Vec<String> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].starts_with("statement_export_"));
    assert!(entries[0].ends_with(".xml"));
}

#[tokio::test]
async fn worker_rejection_reaches_envelope_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("ledger.csv");
    let stub = write_stub(
        dir.path(),
        "worker.sh",
        "cat > /dev/null\nprintf '{\"success\":false,\"message\":\"Unknown format: csv\"}'\n",
    );
    let bridge = Bridge::new(
        client_for(&stub),
        Arc::new(FixedPathDialog::new(&dest)),
    );

    let envelope = bridge.export_transactions(&[sample_transaction()], "csv").await;

    assert!(!envelope.success);
    assert_eq!(envelope.message, "Unknown format: csv");
    assert!(!dest.exists(), "业务拒绝不允许写任何文件");
}

#[tokio::test]
async fn cancelled_export_returns_fixed_message() {
    let dir = tempfile::tempdir().unwrap();
    // 存根一旦被调用就留下痕迹，取消路径必须不碰它
    let marker = dir.path().join("invoked");
    let stub_body = format!("touch {}\nexit 1\n", marker.display());
    let stub = write_stub(dir.path(), "worker.sh", &stub_body);
    let bridge = Bridge::new(client_for(&stub), Arc::new(NullDialog));

    let envelope = bridge.export_transactions(&[sample_transaction()], "tally-xml").await;

    assert!(!envelope.success);
    assert_eq!(envelope.message, "Export cancelled");
    assert!(!marker.exists(), "取消后不允许调用 worker");
}

#[tokio::test]
async fn round_trip_passes_transactions_to_worker_unchanged() {
    let dir = tempfile::tempdir().unwrap();

    // 先经 process 拿到规范化交易
    let process_stub = write_stub(dir.path(), "process.sh", ECHO_PROCESS_STUB);
    let results = assert_ok!(
        BatchProcessor::new(client_for(&process_stub))
            .process_files(&["stmt1.csv".to_string(), "stmt2.csv".to_string()])
            .await
    );
    let transactions: Vec<Transaction> = results
        .iter()
        .filter_map(|r| r.transactions.as_ref())
        .flatten()
        .cloned()
        .collect();
    assert_eq!(transactions.len(), 2);

    // 再喂给 export，存根把 stdin 原样存档
    let capture = dir.path().join("captured.json");
    let dest = dir.path().join("ledger.xml");
    let export_body = format!(
        "cat > {}\nprintf '{{\"success\":true,\"content\":\"<xml/>\"}}'\n",
        capture.display()
    );
    let export_stub = write_stub(dir.path(), "export.sh", &export_body);
    let bridge = Bridge::new(
        client_for(&export_stub),
        Arc::new(FixedPathDialog::new(&dest)),
    );

    let envelope = bridge.export_transactions(&transactions, "tally-xml").await;
    assert!(envelope.success);

    // worker 在标准输入上看到的数组必须与 process 给出的交易结构一致
    let captured = std::fs::read_to_string(&capture).unwrap();
    let captured_value: serde_json::Value = serde_json::from_str(&captured).unwrap();
    assert_eq!(captured_value, serde_json::to_value(&transactions).unwrap());

    let reparsed: Vec<Transaction> = serde_json::from_str(&captured).unwrap();
    assert_eq!(reparsed, transactions);
}

fn sample_transaction() -> Transaction {
    serde_json::from_str(
        r#"{"date":"2024-01-01","description":"X","debit":100.0,"credit":0.0,"balance":5000.0}"#,
    )
    .unwrap()
}
