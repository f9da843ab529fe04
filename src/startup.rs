use crate::configuration::Settings;
use crate::cors::{AllowedOrigins, apply_cors_headers};
use crate::email_templates::EmailTemplates;
use crate::pipelines::{InfluencerPipeline, Pipeline, WaitlistPipeline};
use crate::routes::{
    health_check, join_waitlist, method_not_allowed, preflight, submit_influencer_application,
};
use actix_web::dev::Server;
use actix_web::http::Method;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client()?;
        let templates = EmailTemplates::new()?;

        let waitlist = WaitlistPipeline::from_settings(&config, email_client.as_ref(), &templates)?;
        let influencer =
            InfluencerPipeline::from_settings(&config, email_client.as_ref(), &templates)?;
        let allowed_origins = AllowedOrigins::parse(&config.cors.allowed_origins);
        tracing::info!(
            waitlist_ready = waitlist.is_ready(),
            influencer_ready = influencer.is_ready(),
            allowed_origins = ?allowed_origins,
            "Submission pipelines resolved"
        );

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, waitlist, influencer, allowed_origins)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    waitlist: Pipeline<WaitlistPipeline>,
    influencer: Pipeline<InfluencerPipeline>,
    allowed_origins: AllowedOrigins,
) -> Result<Server, anyhow::Error> {
    let waitlist = web::Data::new(waitlist);
    let influencer = web::Data::new(influencer);
    let allowed_origins = web::Data::new(allowed_origins);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(apply_cors_headers))
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/waitlist")
                    .route(web::post().to(join_waitlist))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/influencer-application")
                    .route(web::post().to(submit_influencer_application))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .app_data(waitlist.clone())
            .app_data(influencer.clone())
            .app_data(allowed_origins.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
