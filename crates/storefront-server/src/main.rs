#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config;

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use std::sync::Arc;

    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use storefront_api::{middleware::session::ensure_cart_session, AppState};
    use storefront_providers::{catalog, CartStore};
    use storefront_ui::{shell, App};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    // Initialize tracing
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse config path from args
    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} catalog={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.catalog.path
    );

    let appState = AppState {
        catalog: Arc::new(catalog::load(&appConfig.catalog.path).await),
        carts: CartStore::with_limits(appConfig.cart.max_carts, appConfig.cart.idle()),
    };

    // Background pruning of idle carts
    {
        let carts = appState.carts.clone();
        let period = appConfig.cart.prune_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = carts.prune_idle().await;
                if removed > 0 {
                    tracing::info!("pruned {removed} idle carts");
                }
            }
        });
    }

    // Get Leptos configuration
    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let addr = appConfig.server.addr().unwrap_or_else(|| {
        tracing::warn!(
            "invalid bind address {}:{}, using {}",
            appConfig.server.bind,
            appConfig.server.port,
            leptosOptions.site_addr
        );
        leptosOptions.site_addr
    });

    let routes = generate_route_list(App);

    // Page renders and server functions read AppState from context;
    // the cart session layer wraps both them and the JSON API.
    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let appState = appState.clone();
                move || provide_context(appState.clone())
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(storefront_api::api_router(appState))
        .layer(axum::middleware::from_fn(ensure_cart_session))
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
