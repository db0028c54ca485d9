use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use log::{error, info};
use simplelog::Config;
use tunnel_editor::*;

#[tokio::main]
async fn main() {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .unwrap();

    if let Err(e) = serve().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn serve() -> Result<()> {
    let master = init().await?;

    let store = Data::new(master.config_store());
    let logs = Data::new(master.tunnel_logs());
    let reverse_proxy = master.reverse_proxy;
    let static_dir = master.static_dir.clone();

    info!(
        "serving {} on {}:{}",
        store.path().display(),
        master.bind,
        master.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(logs.clone())
            .wrap(if reverse_proxy {
                Logger::new(r#"%{Forwarded}i "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#)
            } else {
                Logger::default()
            })
            .service(api::scope())
            .service(static_files(&static_dir))
            .service(home::home)
    })
    .bind((master.bind.as_str(), master.port))?
    .run()
    .await?;

    info!("shutting down...");

    Ok(())
}
