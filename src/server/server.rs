//! HTTP server core implementation

use crate::config::ServerConfig;
use crate::server::builder::{BulkServices, EmbeddedWorker};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{AdminError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
    /// Bulk services mounted per resource
    services: BulkServices,
    /// Worker consuming the queue inside this process
    worker: Option<EmbeddedWorker>,
}

impl HttpServer {
    pub(crate) fn new(
        state: AppState,
        services: BulkServices,
        worker: Option<EmbeddedWorker>,
    ) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
            services,
            worker,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
        services: BulkServices,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let max_body_size = state.config.server().max_body_size;

        App::new()
            .app_data(state)
            .app_data(routes::json_config(max_body_size))
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "admin-bulk")))
            .route("/health", web::get().to(routes::health::health_check))
            .configure(move |cfg| services.configure(cfg))
    }

    /// Start the HTTP server and run until it is stopped
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.bind_address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let services = self.services.clone();

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone(), services.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }
        let server = server
            .bind(&bind_addr)
            .map_err(|e| AdminError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);
        server.await?;
        info!("HTTP server stopped");

        // Dropping the services closes the in-process queue so the worker can drain
        drop(self.services);
        if let Some(worker) = self.worker {
            if let Err(e) = worker.shutdown().await {
                warn!("Bulk worker stopped with error: {}", e);
            }
        }
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
