use anyhow::Result;
use answer_key_submit::utils::logging;
use answer_key_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let result = App::initialize(config).await?.run().await?;

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
