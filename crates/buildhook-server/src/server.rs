//! Server module.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use buildhook_config::{Config, DispatchDriver};
use buildhook_core::use_cases::changes::DispatchTarget;
use buildhook_dispatch_interface::ControllerService;
use buildhook_dispatch_null::NullControllerService;
use buildhook_dispatch_tcp::TcpControllerService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    health::health_check_route, metrics::build_metrics_handler,
    webhook::configure_webhook_handlers, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Controller channel.
    pub controller_service: Box<dyn ControllerService>,
    /// Controller address and credentials.
    pub dispatch_target: DispatchTarget,
}

impl AppContext {
    /// Create new app context, picking the controller channel from config.
    pub fn new(config: Config) -> Result<Self> {
        let controller_service: Box<dyn ControllerService> = match config.dispatch.driver {
            DispatchDriver::Tcp => Box::new(TcpControllerService::new()),
            DispatchDriver::Null => Box::new(NullControllerService::new()),
        };
        let dispatch_target = DispatchTarget::from_config(&config.dispatch)?;

        Ok(Self::new_with_adapters(
            config,
            controller_service,
            dispatch_target,
        ))
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        controller_service: Box<dyn ControllerService>,
        dispatch_target: DispatchTarget,
    ) -> Self {
        Self {
            config,
            controller_service,
            dispatch_target,
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(web::scope("/change_hook").configure(configure_webhook_handlers))
        .route("/health", web::get().to(health_check_route))
}

/// Run webhook server.
pub async fn run_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        controller = %context.dispatch_target.address,
        message = "Starting webhook server",
    );

    run_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let workers_count = context.config.server.workers_count;
    let context = Data::new(context);
    let prometheus = build_metrics_handler()?;

    let mut server =
        HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()));

    if let Some(workers) = workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
