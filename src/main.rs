use anyhow::Result;
use statement_bridge::orchestrator::App;
use statement_bridge::utils::logging;
use statement_bridge::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 命令行参数即待处理的对账单文件列表
    let paths: Vec<String> = std::env::args().skip(1).collect();

    // 初始化并运行应用
    App::initialize(config).await?.run(paths).await?;

    Ok(())
}
