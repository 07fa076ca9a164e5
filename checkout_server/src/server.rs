use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use checkout_engine::{
    sqlite::{create_database, run_migrations},
    OrderFlowApi,
    SqliteCheckoutDb,
};

use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::ServerConfig,
    errors::ServerError,
    integrations::RazorpayGateway,
    routes::{
        health,
        AllOrdersRoute,
        CodOrderRoute,
        CreateOnlineOrderRoute,
        MyOrdersRoute,
        UpdateStatusRoute,
        VerifyPaymentRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    create_database(&config.database_url).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let db = SqliteCheckoutDb::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    run_migrations(db.pool()).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteCheckoutDb) -> Result<Server, ServerError> {
    let gateway = RazorpayGateway::new(config.razorpay.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), gateway.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        let jwt_verifier = TokenVerifier::new(&config.auth);
        let order_scope = web::scope("/order")
            .service(CodOrderRoute::<SqliteCheckoutDb, RazorpayGateway>::new())
            .service(CreateOnlineOrderRoute::<SqliteCheckoutDb, RazorpayGateway>::new())
            .service(VerifyPaymentRoute::<SqliteCheckoutDb, RazorpayGateway>::new())
            .service(MyOrdersRoute::<SqliteCheckoutDb, RazorpayGateway>::new())
            .service(AllOrdersRoute::<SqliteCheckoutDb, RazorpayGateway>::new())
            .service(UpdateStatusRoute::<SqliteCheckoutDb, RazorpayGateway>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("checkout::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(jwt_signer))
            .app_data(web::Data::new(jwt_verifier))
            .service(health)
            .service(order_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
