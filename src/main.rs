use anyhow::{Context, Result};
use resume_analyzer::utils::logging;
use resume_analyzer::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（默认值 → TOML → 环境变量 → 命令行参数）
    let config = Config::load(std::env::args().skip(1)).context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config)
        .await
        .context("初始化失败")?;
    app.run().await?;

    Ok(())
}
