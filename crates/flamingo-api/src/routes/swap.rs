//! Swap routing, quoting and invocation endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;

use flamingo::{
    build_swap_invocation, calculate_best_route, calculate_swap_details, route_path,
    PricingInput, Quote, SwapAmount, SwapInvocationArgs, SwapInvocationKind, SwapRoute,
    SwapShape,
};
use flamingo_core::{Address, Network, SwapError};

use crate::dto::{
    swap_error, ApiResult, InvocationRequest, InvocationResponse, QuoteRequest, QuoteResponse,
    RouteRequest, RouteResponse, TokensResponse,
};
use crate::routes::now_ms;
use crate::AppState;

const MS_PER_MINUTE: u64 = 60_000;

/// Create swap routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tokens", get(get_tokens))
        .route("/route", post(get_route))
        .route("/quote", post(get_quote))
        .route("/invocation", post(build_invocation))
}

/// GET /swap/tokens - List tokens reachable through the pool graph
pub async fn get_tokens(State(state): State<AppState>) -> Json<TokensResponse> {
    Json(TokensResponse {
        network: state.registry().network(),
        tokens: state.session().swappable_tokens(),
    })
}

/// POST /swap/route - Find the shortest route and read its reserves
pub async fn get_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> ApiResult<RouteResponse> {
    let route = load_route(&state, &request).await.map_err(swap_error)?;
    Ok(Json(RouteResponse::new(route)))
}

/// POST /swap/quote - Price a swap
pub async fn get_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<QuoteResponse> {
    let (route, slippage, quote) = price(&state, &request).await.map_err(swap_error)?;
    Ok(Json(QuoteResponse {
        route: RouteResponse::new(route),
        slippage,
        quote,
    }))
}

/// POST /swap/invocation - Price a swap and build the bundle to sign
pub async fn build_invocation(
    State(state): State<AppState>,
    Json(request): Json<InvocationRequest>,
) -> ApiResult<InvocationResponse> {
    invocation(&state, request).await.map(Json).map_err(swap_error)
}

// =============================================================================
// Helpers
// =============================================================================

fn ensure_network(state: &AppState, requested: Option<Network>) -> Result<(), SwapError> {
    match requested {
        Some(network) if network != state.registry().network() => {
            Err(SwapError::NetworkNotSupported {
                network: network.to_string(),
            })
        }
        _ => Ok(()),
    }
}

async fn load_route(state: &AppState, request: &RouteRequest) -> Result<Vec<SwapRoute>, SwapError> {
    ensure_network(state, request.network)?;
    let route = calculate_best_route(
        state.invoker(),
        state.registry(),
        state.graph(),
        &request.token_to_use,
        &request.token_to_receive,
    )
    .await?;

    tracing::debug!(
        from = %request.token_to_use,
        to = %request.token_to_receive,
        hops = route.len(),
        "Route loaded"
    );
    Ok(route)
}

async fn price(
    state: &AppState,
    request: &QuoteRequest,
) -> Result<(Vec<SwapRoute>, Decimal, Option<Quote>), SwapError> {
    let amount = request.amount()?;
    let slippage = request.slippage.unwrap_or(state.config().swap.slippage);
    let route = load_route(state, &request.route_request()).await?;
    if route.is_empty() {
        return Ok((route, slippage, None));
    }

    let registry = state.registry();
    let quote = calculate_swap_details(
        registry,
        PricingInput {
            route: &route,
            token_to_use: registry.token(&request.token_to_use)?,
            token_to_receive: registry.token(&request.token_to_receive)?,
            slippage,
            amount: &amount,
        },
    )?;
    Ok((route, slippage, Some(quote)))
}

async fn invocation(
    state: &AppState,
    request: InvocationRequest,
) -> Result<InvocationResponse, SwapError> {
    let (route, _, quote) = price(state, &request.quote).await?;
    let quote = quote.ok_or(SwapError::MissingParameter { name: "route" })?;
    let missing = |name| SwapError::MissingParameter { name };

    let kind = match request.quote.amount()? {
        SwapAmount::ToUse(_) => SwapInvocationKind::ToUse {
            amount_to_use: quote.amount_to_use_to_display.clone(),
            minimum_received: quote
                .minimum_received
                .clone()
                .ok_or_else(|| missing("minimum_received"))?,
        },
        SwapAmount::ToReceive(_) => SwapInvocationKind::ToReceive {
            amount_to_receive: quote.amount_to_receive_to_display.clone(),
            maximum_selling: quote
                .maximum_selling
                .clone()
                .ok_or_else(|| missing("maximum_selling"))?,
        },
    };

    let deadline = request
        .deadline
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| {
            let minutes = state.config().swap.deadline_minutes;
            now_ms()
                .saturating_add(minutes.saturating_mul(MS_PER_MINUTE))
                .to_string()
        });

    let args = SwapInvocationArgs {
        address: Address::new(request.address),
        route_path: route_path(&route),
        deadline,
        kind,
    };
    let shape = SwapShape::classify(state.registry(), &args.route_path);
    let invocation = build_swap_invocation(state.registry(), &args)?;

    tracing::info!(
        address = %args.address,
        shape = ?shape,
        calls = invocation.invocations.len(),
        "Swap invocation built"
    );

    Ok(InvocationResponse {
        shape,
        quote,
        args,
        invocation,
    })
}
