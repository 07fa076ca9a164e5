//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into
//! a separate module. Keep this module neat and tidy 🙏
use actix_web::{get, web, HttpResponse, Responder};
use checkout_engine::{
    db_types::PaymentClaim,
    traits::{CheckoutDatabase, PaymentGateway},
    OrderFlowApi,
};
use log::*;

use crate::{
    auth::{JwtClaims, Role},
    data_objects::{
        JsonResponse,
        NewOrderRequest,
        OnlineOrderResponse,
        OrderListResponse,
        OrderPlacedResponse,
        UpdateStatusRequest,
        VerifyPaymentRequest,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(cod_order => Post "/cod" impl CheckoutDatabase, PaymentGateway);
/// Place a cash-on-delivery order from the buyer's current cart. The request carries nothing but
/// the delivery address; pricing and stock checks happen server-side.
pub async fn cod_order<B, G>(
    claims: JwtClaims,
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: CheckoutDatabase + 'static,
    G: PaymentGateway + 'static,
{
    claims.require_role(Role::Buyer)?;
    debug!("💻️ POST cod order for {}", claims.sub);
    let order = api.place_cod_order(&claims.sub, &body.address_id).await?;
    Ok(HttpResponse::Ok().json(OrderPlacedResponse { success: true, message: "Order placed".to_string(), order }))
}

route!(create_online_order => Post "/online/create" impl CheckoutDatabase, PaymentGateway);
/// Create an online-payment order and its gateway session. The cart stays intact until the
/// payment is verified.
pub async fn create_online_order<B, G>(
    claims: JwtClaims,
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: CheckoutDatabase + 'static,
    G: PaymentGateway + 'static,
{
    claims.require_role(Role::Buyer)?;
    debug!("💻️ POST online order for {}", claims.sub);
    let (order, intent) = api.create_online_order(&claims.sub, &body.address_id).await?;
    Ok(HttpResponse::Ok().json(OnlineOrderResponse {
        success: true,
        order_id: order.id,
        key: intent.key_id,
        session: intent.session,
    }))
}

route!(verify_payment => Post "/online/verify" impl CheckoutDatabase, PaymentGateway);
/// Verify a claimed gateway payment and commit the paid state. Every claim field is treated as
/// hostile until the engine's verifier says otherwise.
pub async fn verify_payment<B, G>(
    claims: JwtClaims,
    body: web::Json<VerifyPaymentRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: CheckoutDatabase + 'static,
    G: PaymentGateway + 'static,
{
    claims.require_role(Role::Buyer)?;
    let claim = PaymentClaim::from(body.into_inner());
    debug!("💻️ POST verify payment for order {}", claim.order_id);
    let order = api.verify_payment(&claim).await?;
    Ok(HttpResponse::Ok().json(OrderPlacedResponse {
        success: true,
        message: "Payment verified".to_string(),
        order,
    }))
}

route!(my_orders => Get "/mine" impl CheckoutDatabase, PaymentGateway);
pub async fn my_orders<B, G>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: CheckoutDatabase + 'static,
    G: PaymentGateway + 'static,
{
    claims.require_role(Role::Buyer)?;
    debug!("💻️ GET orders for {}", claims.sub);
    let orders = api.orders_for_buyer(&claims.sub).await?;
    Ok(HttpResponse::Ok().json(OrderListResponse { success: true, orders }))
}

route!(all_orders => Get "/all" impl CheckoutDatabase, PaymentGateway);
pub async fn all_orders<B, G>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: CheckoutDatabase + 'static,
    G: PaymentGateway + 'static,
{
    claims.require_role(Role::Seller)?;
    debug!("💻️ GET all orders for seller {}", claims.sub);
    let orders = api.all_orders().await?;
    Ok(HttpResponse::Ok().json(OrderListResponse { success: true, orders }))
}

route!(update_status => Post "/status" impl CheckoutDatabase, PaymentGateway);
pub async fn update_status<B, G>(
    claims: JwtClaims,
    body: web::Json<UpdateStatusRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: CheckoutDatabase + 'static,
    G: PaymentGateway + 'static,
{
    claims.require_role(Role::Seller)?;
    debug!("💻️ POST status {} for order {}", body.status, body.order_id);
    api.update_status(&body.order_id, body.status).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Status updated")))
}
