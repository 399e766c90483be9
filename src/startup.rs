use crate::configuration::{EmailClientSettings, Settings};
use crate::routes::{contact, contact_payload_error, health_check};
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );

        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, configuration.email_client)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client_settings: EmailClientSettings,
) -> Result<Server, anyhow::Error> {
    let email_client_settings = Data::new(email_client_settings);
    let server = HttpServer::new(move || {
        App::new()
            // Middleware
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/contact")
                    .app_data(web::JsonConfig::default().error_handler(contact_payload_error))
                    .route(web::post().to(contact)),
            )
            .app_data(email_client_settings.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
