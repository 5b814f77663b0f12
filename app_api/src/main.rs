use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use anyhow::Result;
use app_api::handlers;
use biz_service::biz_service::{ServerRes, build_sessions, configure};
use common::config::AppConfig;
use common::db::init_db;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // 读取配置文件
    let file = std::env::var("APP_CONFIG").unwrap_or_else(|_| "api-config.toml".to_string());
    let app_cfg = AppConfig::new(&file)?;
    //初始化日志
    init_log(&app_cfg)?;
    let res = build_server_res(&app_cfg).await?;
    let sessions = build_sessions(&app_cfg.get_session());
    let address_and_port = format!("{}:{}", &app_cfg.get_server().host, &app_cfg.get_server().port);
    info!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            //配置 服务
            .configure(|cfg| configure(cfg, res.clone(), sessions.clone()))
            // 配置 控制器
            .configure(handlers::configure)
    })
    .bind(address_and_port)?
    .run()
    .await?;
    Ok(())
}

pub fn init_log(config: &AppConfig) -> Result<()> {
    env_logger::Builder::new().parse_filters(&config.get_sys().log_level).try_init()?;
    Ok(())
}

async fn build_server_res(config: &AppConfig) -> Result<ServerRes> {
    let database = config.get_database();
    if database.is_memory() {
        info!("using in-memory store");
        return Ok(ServerRes::memory());
    }
    let db = init_db(&database).await?;
    info!("using MongoDB database {}", database.db_name);
    Ok(ServerRes::mongo(&db).await?)
}
