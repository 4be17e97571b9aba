use ember_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env()?;

    // 3. 初始化日志 (生产环境落盘)
    std::fs::create_dir_all(config.log_dir())?;
    if config.is_production() {
        init_logger_with_file(Some("info"), Some(&config.log_dir()));
    } else {
        init_logger_with_file(Some("debug"), None);
    }

    tracing::info!("Ember server starting...");

    // 4. 初始化服务器状态 (打开数据库、播种管理员)
    let state = ServerState::initialize(config.clone()).await?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
