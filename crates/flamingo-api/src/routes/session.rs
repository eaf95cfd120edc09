//! Shared swap session endpoints

use axum::{extract::State, routing::get, Json, Router};

use flamingo::{build_swap_invocation, ReserveInvoker, SwapController, SwapShape, SwapState};
use flamingo_core::{Address, SwapError};

use crate::dto::{
    swap_error, ApiResult, SessionInvocationResponse, SessionResponse, SessionUpdateRequest,
};
use crate::routes::now_ms;
use crate::AppState;

/// Create session routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session).post(update_session))
        .route("/invocation", get(get_invocation))
}

/// GET /session - Current selections, route and quote
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.session().state().await)
}

/// POST /session - Patch the session and re-price
pub async fn update_session(
    State(state): State<AppState>,
    Json(request): Json<SessionUpdateRequest>,
) -> ApiResult<SessionResponse> {
    apply_update(state.session(), request)
        .await
        .map(Json)
        .map_err(swap_error)
}

/// GET /session/invocation - Build the bundle for the current session
pub async fn get_invocation(State(state): State<AppState>) -> ApiResult<SessionInvocationResponse> {
    let session = state.session();
    let args = session.invocation_args(now_ms()).await.map_err(swap_error)?;
    let invocation = build_swap_invocation(state.registry(), &args).map_err(swap_error)?;
    let shape = SwapShape::classify(state.registry(), &args.route_path);

    Ok(Json(SessionInvocationResponse {
        shape,
        args,
        invocation,
    }))
}

/// Apply patch fields in a fixed order: settings, tokens, then amounts
async fn apply_update(
    session: &SwapController<dyn ReserveInvoker>,
    request: SessionUpdateRequest,
) -> Result<SwapState, SwapError> {
    if let Some(slippage) = request.slippage {
        session.set_slippage(slippage).await?;
    }
    if let Some(minutes) = request.deadline_minutes {
        session.set_deadline_minutes(minutes).await;
    }
    if let Some(account) = request.account {
        session.set_account(Some(Address::new(account))).await;
    }
    if let Some(symbol) = request.token_to_use {
        session.set_token_to_use(Some(&symbol)).await?;
    }
    if let Some(symbol) = request.token_to_receive {
        session.set_token_to_receive(Some(&symbol)).await?;
    }
    if let Some(amount) = request.amount_to_use {
        session.set_amount_to_use(non_empty(amount)).await;
    }
    if let Some(amount) = request.amount_to_receive {
        session.set_amount_to_receive(non_empty(amount)).await;
    }
    Ok(session.state().await)
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
