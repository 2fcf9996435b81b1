mod capabilities;
mod config;
mod data_url;
mod error;
mod export;
mod job_controller;
mod registry;
mod services;
mod store;
#[cfg(test)]
mod test_support;

use crate::capabilities::Capabilities;
use crate::config::AppConfig;
use crate::job_controller::state::{start_job_updater, JobsState};
use crate::registry::{builtin, TemplateRegistry};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    let (jobs_state, rx) = JobsState::new(100);
    tokio::spawn(start_job_updater(jobs_state.clone(), rx));

    let registry = TemplateRegistry::with_templates(builtin::builtin_templates(&config.company_name));
    let sessions = store::session_store();
    let drafts = store::draft_store();
    let capabilities = Capabilities::mocks(&config);

    info!("Server running at {}", config.url());

    let bind = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(config.json_limit))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .app_data(web::Data::new(drafts.clone()))
            .app_data(web::Data::new(capabilities.clone()))
            .configure(services::configure)
    })
    .bind(bind)?
    .run()
    .await
}
