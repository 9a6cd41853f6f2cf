use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use accredit_adapters::http::{
    AppState,
    routes::{
        change_password, create_item, health, list_items, register, resend_verification,
        setup_admin, user_exists, verify_email,
    },
};
use accredit_core::{AccountStore, EmailClient, ItemStore, TokenBlacklist};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Account service exposing the registration, verification, and inventory
/// routes over one shared state.
pub struct AccountService {
    router: Router,
}

impl AccountService {
    pub fn new<A, B, I, E>(state: AppState<A, B, I, E>) -> Self
    where
        A: AccountStore + 'static,
        B: TokenBlacklist + 'static,
        I: ItemStore + 'static,
        E: EmailClient + 'static,
    {
        let router = Router::new()
            .route("/register", post(register::<A, B, I, E>))
            .route("/setup-admin", post(setup_admin::<A, B, I, E>))
            .route("/user-exists", get(user_exists::<A, B, I, E>))
            .route(
                "/resend-verification",
                post(resend_verification::<A, B, I, E>),
            )
            .route("/verify-email", post(verify_email::<A, B, I, E>))
            .route("/change-password", post(change_password::<A, B, I, E>))
            .route("/health", get(health))
            .route(
                "/items",
                get(list_items::<A, B, I, E>).post(create_item::<A, B, I, E>),
            )
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be served directly or nested into a
    /// larger application.
    pub fn into_router(mut self, allowed_origins: Option<Vec<HeaderValue>>) -> Router {
        if let Some(origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::list(origins));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the account service as a standalone server
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<Vec<HeaderValue>>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
