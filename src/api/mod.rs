use actix_web::Scope;

mod config;
mod status;

pub fn scope() -> Scope {
    Scope::new("/api")
        .service(config::get_config)
        .service(config::update_config)
        .service(status::status)
}
