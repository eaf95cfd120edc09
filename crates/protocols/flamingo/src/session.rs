//! Swap Session
//!
//! Holds one user's swap selections and keeps the route and quote in step
//! with them. Route fetches run async; a result is applied only if no newer
//! change was made while it was in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use flamingo_core::{Address, ContractInvocationMulti, SwapConfig, SwapError, Token};

use crate::calculator::slippage_parts;
use crate::fetch::{calculate_best_route, ReserveInvoker};
use crate::graph::PoolGraph;
use crate::invocation::{build_swap_invocation, SwapInvocationArgs, SwapInvocationKind};
use crate::pricing::{calculate_swap_details, PricingInput};
use crate::registry::{route_path, NetworkRegistry};
use crate::state::{Quote, SwapAmount, SwapRoute};

const MS_PER_MINUTE: u64 = 60_000;

/// Which amount the user typed last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSide {
    ToUse,
    ToReceive,
}

/// User selections plus the route and quote derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapState {
    pub account: Option<Address>,
    pub token_to_use: Option<Token>,
    pub token_to_receive: Option<Token>,
    pub amount_to_use: Option<String>,
    pub amount_to_receive: Option<String>,
    pub last_amount_changed: Option<AmountSide>,
    pub slippage: Decimal,
    pub deadline_minutes: u64,
    /// Empty when no route is loaded or the pair is not swappable
    pub route: Vec<SwapRoute>,
    pub quote: Option<Quote>,
}

impl SwapState {
    pub fn new(config: &SwapConfig) -> Self {
        Self {
            account: None,
            token_to_use: None,
            token_to_receive: None,
            amount_to_use: None,
            amount_to_receive: None,
            last_amount_changed: None,
            slippage: config.slippage,
            deadline_minutes: config.deadline_minutes,
            route: Vec::new(),
            quote: None,
        }
    }

    /// The amount the user fixed, if it is set
    pub fn amount(&self) -> Option<SwapAmount> {
        let (value, wrap): (&Option<String>, fn(String) -> SwapAmount) = match self.last_amount_changed? {
            AmountSide::ToUse => (&self.amount_to_use, SwapAmount::ToUse),
            AmountSide::ToReceive => (&self.amount_to_receive, SwapAmount::ToReceive),
        };
        value
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| wrap(v.clone()))
    }

    fn clear_derived(&mut self) {
        self.quote = None;
        match self.last_amount_changed {
            Some(AmountSide::ToUse) => self.amount_to_receive = None,
            Some(AmountSide::ToReceive) => self.amount_to_use = None,
            None => {}
        }
    }
}

/// Price the current route and fill in the derived side.
///
/// Missing inputs or a pricing failure leave the state without a quote.
pub fn recompute(state: &SwapState, registry: &NetworkRegistry) -> SwapState {
    let mut next = state.clone();

    let (Some(token_to_use), Some(token_to_receive), Some(amount)) =
        (&state.token_to_use, &state.token_to_receive, state.amount())
    else {
        next.clear_derived();
        return next;
    };
    if state.route.is_empty() {
        next.clear_derived();
        return next;
    }

    let input = PricingInput {
        route: &state.route,
        token_to_use,
        token_to_receive,
        slippage: state.slippage,
        amount: &amount,
    };

    match calculate_swap_details(registry, input) {
        Ok(quote) => {
            next.amount_to_use = Some(quote.amount_to_use_to_display.clone());
            next.amount_to_receive = Some(quote.amount_to_receive_to_display.clone());
            next.quote = Some(quote);
        }
        Err(e) => {
            tracing::warn!(
                from = %token_to_use.symbol,
                to = %token_to_receive.symbol,
                "Failed to price swap: {}",
                e
            );
            next.clear_derived();
        }
    }
    next
}

/// Route fetch started for one token pair
#[derive(Debug)]
struct PendingRoute {
    generation: u64,
    pair: Option<(String, String)>,
}

fn symbol_pair(state: &SwapState) -> Option<(String, String)> {
    match (&state.token_to_use, &state.token_to_receive) {
        (Some(a), Some(b)) => Some((a.symbol.clone(), b.symbol.clone())),
        _ => None,
    }
}

/// Shared swap session bound to one network
pub struct SwapController<I: ?Sized> {
    invoker: Arc<I>,
    registry: Arc<NetworkRegistry>,
    graph: Arc<PoolGraph>,
    state: RwLock<SwapState>,
    generation: AtomicU64,
}

impl<I: ReserveInvoker + ?Sized> SwapController<I> {
    pub fn new(
        invoker: Arc<I>,
        registry: Arc<NetworkRegistry>,
        graph: Arc<PoolGraph>,
        config: &SwapConfig,
    ) -> Self {
        Self {
            invoker,
            registry,
            graph,
            state: RwLock::new(SwapState::new(config)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> SwapState {
        self.state.read().await.clone()
    }

    /// Tokens that appear in the pool graph, in registry order
    pub fn swappable_tokens(&self) -> Vec<Token> {
        self.graph
            .symbols()
            .filter_map(|symbol| self.registry.token(symbol).ok().cloned())
            .collect()
    }

    pub async fn set_account(&self, account: Option<Address>) -> SwapState {
        let mut state = self.state.write().await;
        state.account = account.filter(|a| !a.is_empty());
        state.clone()
    }

    pub async fn set_token_to_use(&self, symbol: Option<&str>) -> Result<SwapState, SwapError> {
        let token = self.resolve(symbol)?;
        let pending = {
            let mut state = self.state.write().await;
            state.token_to_use = token;
            state.route.clear();
            state.clear_derived();
            self.begin_reload(&state)
        };
        self.reload_route(pending).await
    }

    pub async fn set_token_to_receive(&self, symbol: Option<&str>) -> Result<SwapState, SwapError> {
        let token = self.resolve(symbol)?;
        let pending = {
            let mut state = self.state.write().await;
            state.token_to_receive = token;
            state.route.clear();
            state.clear_derived();
            self.begin_reload(&state)
        };
        self.reload_route(pending).await
    }

    pub async fn set_amount_to_use(&self, amount: Option<String>) -> SwapState {
        self.update(|state| {
            state.amount_to_use = amount;
            state.last_amount_changed = Some(AmountSide::ToUse);
        })
        .await
    }

    pub async fn set_amount_to_receive(&self, amount: Option<String>) -> SwapState {
        self.update(|state| {
            state.amount_to_receive = amount;
            state.last_amount_changed = Some(AmountSide::ToReceive);
        })
        .await
    }

    pub async fn set_slippage(&self, slippage: Decimal) -> Result<SwapState, SwapError> {
        slippage_parts(slippage)?;
        Ok(self.update(|state| state.slippage = slippage).await)
    }

    pub async fn set_deadline_minutes(&self, minutes: u64) -> SwapState {
        let mut state = self.state.write().await;
        state.deadline_minutes = minutes;
        state.clone()
    }

    /// Re-read reserves for the current pair and re-price
    pub async fn refresh_reserves(&self) -> Result<SwapState, SwapError> {
        let pending = {
            let state = self.state.read().await;
            self.begin_reload(&state)
        };
        self.reload_route(pending).await
    }

    /// Turn the current state into builder input.
    ///
    /// The deadline is `now_ms` plus the configured minutes.
    pub async fn invocation_args(&self, now_ms: u64) -> Result<SwapInvocationArgs, SwapError> {
        let state = self.state.read().await;
        let missing = |name| SwapError::MissingParameter { name };

        let address = state.account.clone().ok_or_else(|| missing("account"))?;
        if state.token_to_use.is_none() {
            return Err(missing("token_to_use"));
        }
        if state.token_to_receive.is_none() {
            return Err(missing("token_to_receive"));
        }
        if state.route.is_empty() {
            return Err(missing("route"));
        }
        let quote = state.quote.as_ref().ok_or_else(|| missing("quote"))?;
        let amount_to_use = state.amount_to_use.clone().ok_or_else(|| missing("amount_to_use"))?;
        let amount_to_receive = state
            .amount_to_receive
            .clone()
            .ok_or_else(|| missing("amount_to_receive"))?;

        let kind = match state.last_amount_changed {
            Some(AmountSide::ToReceive) => SwapInvocationKind::ToReceive {
                amount_to_receive,
                maximum_selling: quote
                    .maximum_selling
                    .clone()
                    .ok_or_else(|| missing("maximum_selling"))?,
            },
            _ => SwapInvocationKind::ToUse {
                amount_to_use,
                minimum_received: quote
                    .minimum_received
                    .clone()
                    .ok_or_else(|| missing("minimum_received"))?,
            },
        };

        let deadline = now_ms.saturating_add(state.deadline_minutes.saturating_mul(MS_PER_MINUTE));

        Ok(SwapInvocationArgs {
            address,
            route_path: route_path(&state.route),
            deadline: deadline.to_string(),
            kind,
        })
    }

    /// Build the contract invocation bundle for the current state
    pub async fn build_invocation(&self, now_ms: u64) -> Result<ContractInvocationMulti, SwapError> {
        let args = self.invocation_args(now_ms).await?;
        build_swap_invocation(&self.registry, &args)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn resolve(&self, symbol: Option<&str>) -> Result<Option<Token>, SwapError> {
        symbol
            .filter(|s| !s.is_empty())
            .map(|s| self.registry.token(s).cloned())
            .transpose()
    }

    async fn update(&self, apply: impl FnOnce(&mut SwapState)) -> SwapState {
        let mut state = self.state.write().await;
        apply(&mut state);
        *state = recompute(&state, &self.registry);
        state.clone()
    }

    /// Claim a new generation for the pair in `state`.
    ///
    /// Must be called while holding the state lock so the pair and the
    /// generation are read together.
    fn begin_reload(&self, state: &SwapState) -> PendingRoute {
        PendingRoute {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
            pair: symbol_pair(state),
        }
    }

    async fn reload_route(&self, pending: PendingRoute) -> Result<SwapState, SwapError> {
        let Some((use_symbol, receive_symbol)) = pending.pair.clone() else {
            return Ok(self.update(|_| {}).await);
        };

        let fetched = calculate_best_route(
            self.invoker.as_ref(),
            &self.registry,
            &self.graph,
            &use_symbol,
            &receive_symbol,
        )
        .await;

        let generation = pending.generation;
        let mut state = self.state.write().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation || symbol_pair(&state) != pending.pair {
            tracing::debug!(generation, latest, "Discarding stale route");
            return Ok(state.clone());
        }

        let route = match fetched {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!(from = %use_symbol, to = %receive_symbol, "Route fetch failed: {}", e);
                return Err(e);
            }
        };

        tracing::debug!(
            from = %use_symbol,
            to = %receive_symbol,
            hops = route.len(),
            generation,
            "Applied route"
        );

        state.route = route;
        *state = recompute(&state, &self.registry);
        Ok(state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use flamingo_core::{Network, ScriptHash};
    use rust_decimal_macros::dec;
    use tokio::sync::Notify;

    use crate::fetch::tests::StaticInvoker;
    use crate::fetch::{ReservePair, ReserveQuery};

    const SENDER: &str = "NNLi44dJNXtDNSBkofB48aTVYtb1zZrNEs";

    fn registry() -> Arc<NetworkRegistry> {
        Arc::new(NetworkRegistry::for_network(Network::Mainnet).unwrap())
    }

    fn controller<I: ReserveInvoker>(registry: Arc<NetworkRegistry>, invoker: I) -> SwapController<I> {
        let graph = Arc::new(PoolGraph::build(&registry).unwrap());
        SwapController::new(Arc::new(invoker), registry, graph, &SwapConfig::default())
    }

    fn flm_gas_invoker(registry: &NetworkRegistry) -> StaticInvoker {
        StaticInvoker::default()
            .with_pool(registry, "FLM", "500000000000000", "GAS", "8200000000000")
            .with_pool(registry, "bNEO", "30000000000000", "GAS", "90000000000000")
    }

    #[test]
    fn test_recompute_without_amount_clears_quote() {
        let reg = registry();
        let mut state = SwapState::new(&SwapConfig::default());
        state.token_to_use = Some(reg.token("FLM").unwrap().clone());
        state.token_to_receive = Some(reg.gas().clone());
        state.quote = Some(Quote {
            amount_to_use_to_display: "1".into(),
            amount_to_receive_to_display: "2".into(),
            liquidity_provider_fee: "0.0030".into(),
            price_impact: None,
            price_inverse: None,
            minimum_received: None,
            maximum_selling: None,
        });

        let next = recompute(&state, &reg);
        assert!(next.quote.is_none());
        // input state untouched
        assert!(state.quote.is_some());
    }

    #[test]
    fn test_recompute_pricing_error_clears_quote() {
        let reg = registry();
        let mut state = SwapState::new(&SwapConfig::default());
        state.token_to_use = Some(reg.token("FLM").unwrap().clone());
        state.token_to_receive = Some(reg.gas().clone());
        state.route = vec![SwapRoute {
            token_to_use: reg.token("FLM").unwrap().clone(),
            reserve_token_to_use: "1000".into(),
            token_to_receive: reg.gas().clone(),
            reserve_token_to_receive: "10".into(),
        }];
        state.amount_to_receive = Some("5".into());
        state.amount_to_use = Some("stale".into());
        state.last_amount_changed = Some(AmountSide::ToReceive);

        let next = recompute(&state, &reg);
        assert!(next.quote.is_none());
        assert_eq!(next.amount_to_use, None);
        assert_eq!(next.amount_to_receive.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_token_and_amount_flow() {
        let reg = registry();
        let ctl = controller(reg.clone(), flm_gas_invoker(&reg));

        ctl.set_token_to_use(Some("FLM")).await.unwrap();
        let state = ctl.set_token_to_receive(Some("GAS")).await.unwrap();
        assert_eq!(state.route.len(), 1);
        assert!(state.quote.is_none());

        let state = ctl.set_amount_to_use(Some("1".into())).await;
        let quote = state.quote.clone().unwrap();
        assert_eq!(state.amount_to_receive.as_deref(), Some("0.01635079"));
        assert_eq!(quote.minimum_received.as_deref(), Some("0.01626903"));

        let state = ctl.set_slippage(dec!(0)).await.unwrap();
        assert_eq!(
            state.quote.unwrap().minimum_received.as_deref(),
            Some("0.01635079")
        );

        assert!(matches!(
            ctl.set_slippage(dec!(2)).await,
            Err(SwapError::InvalidAmount { .. })
        ));
        assert!(matches!(
            ctl.set_token_to_use(Some("NOPE")).await,
            Err(SwapError::UnknownToken { .. })
        ));
    }

    #[tokio::test]
    async fn test_build_invocation_from_session() {
        let reg = registry();
        let ctl = controller(reg.clone(), flm_gas_invoker(&reg));

        assert!(matches!(
            ctl.build_invocation(0).await,
            Err(SwapError::MissingParameter { name: "account" })
        ));

        ctl.set_account(Some(Address::new(SENDER))).await;
        ctl.set_token_to_use(Some("NEO")).await.unwrap();
        ctl.set_token_to_receive(Some("GAS")).await.unwrap();
        ctl.set_amount_to_use(Some("2".into())).await;

        let args = ctl.invocation_args(1_700_000_000_000).await.unwrap();
        assert_eq!(args.deadline, "1700000600000");
        let symbols: Vec<&str> = args.route_path.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["NEO", "bNEO", "GAS"]);

        let bundle = ctl.build_invocation(1_700_000_000_000).await.unwrap();
        assert_eq!(bundle.invocations.len(), 2);
        assert_eq!(bundle.invocations[0].script_hash, reg.neo().hash);
    }

    #[tokio::test]
    async fn test_refresh_reserves_reprices() {
        let reg = registry();
        let ctl = controller(reg.clone(), flm_gas_invoker(&reg));

        // nothing selected yet
        let state = ctl.refresh_reserves().await.unwrap();
        assert!(state.route.is_empty());

        ctl.set_token_to_use(Some("FLM")).await.unwrap();
        ctl.set_token_to_receive(Some("GAS")).await.unwrap();
        ctl.set_amount_to_receive(Some("1".into())).await;
        let state = ctl.refresh_reserves().await.unwrap();
        assert_eq!(state.amount_to_use.as_deref(), Some("61.15983287"));
        assert!(state.quote.unwrap().maximum_selling.is_some());
    }

    /// Blocks the `gated_call`-th reserve request (zero-based) until released
    struct GatedInvoker {
        inner: StaticInvoker,
        gate: Notify,
        calls: AtomicUsize,
        gated_call: usize,
    }

    #[async_trait]
    impl ReserveInvoker for GatedInvoker {
        async fn get_reserves(
            &self,
            router: &ScriptHash,
            queries: &[ReserveQuery],
        ) -> Result<Vec<ReservePair>, SwapError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == self.gated_call {
                self.gate.notified().await;
            }
            self.inner.get_reserves(router, queries).await
        }
    }

    #[tokio::test]
    async fn test_late_route_result_is_ignored() {
        let reg = registry();
        let invoker = GatedInvoker {
            inner: flm_gas_invoker(&reg)
                .with_pool(&reg, "bNEO", "20000000000000", "FLM", "400000000000000"),
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
            gated_call: 0,
        };
        let ctl = Arc::new(controller(reg.clone(), invoker));
        ctl.set_token_to_use(Some("FLM")).await.unwrap();

        let slow = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.set_token_to_receive(Some("GAS")).await })
        };
        while ctl.invoker.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let state = ctl.set_token_to_receive(Some("bNEO")).await.unwrap();
        assert_eq!(state.route[0].token_to_receive.symbol, "bNEO");

        ctl.invoker.gate.notify_one();
        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale.route[0].token_to_receive.symbol, "bNEO");

        let state = ctl.state().await;
        assert_eq!(state.token_to_receive.unwrap().symbol, "bNEO");
        assert_eq!(state.route[0].token_to_receive.symbol, "bNEO");
    }

    #[tokio::test]
    async fn test_refresh_in_flight_does_not_outlive_token_change() {
        let reg = registry();
        let invoker = GatedInvoker {
            inner: flm_gas_invoker(&reg),
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
            gated_call: 1,
        };
        let ctl = Arc::new(controller(reg.clone(), invoker));
        ctl.set_token_to_use(Some("FLM")).await.unwrap();
        ctl.set_token_to_receive(Some("GAS")).await.unwrap();
        ctl.set_amount_to_use(Some("1".into())).await;

        let refresh = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.refresh_reserves().await })
        };
        while ctl.invoker.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }

        // no fUSDT pool is seeded, so this fetch fails
        assert!(matches!(
            ctl.set_token_to_use(Some("fUSDT")).await,
            Err(SwapError::InvalidReserves { .. })
        ));

        ctl.invoker.gate.notify_one();
        refresh.await.unwrap().unwrap();

        let state = ctl.state().await;
        assert_eq!(state.token_to_use.unwrap().symbol, "fUSDT");
        assert!(state.route.is_empty());
        assert!(state.quote.is_none());
    }

    #[tokio::test]
    async fn test_route_for_replaced_pair_is_not_applied() {
        let reg = registry();
        let ctl = controller(reg.clone(), flm_gas_invoker(&reg));
        ctl.set_token_to_use(Some("FLM")).await.unwrap();
        ctl.set_token_to_receive(Some("GAS")).await.unwrap();

        let pending = {
            let state = ctl.state.read().await;
            ctl.begin_reload(&state)
        };
        {
            let mut state = ctl.state.write().await;
            state.token_to_use = Some(reg.bneo().clone());
            state.route.clear();
        }

        let state = ctl.reload_route(pending).await.unwrap();
        assert_eq!(state.token_to_use.unwrap().symbol, "bNEO");
        assert!(state.route.is_empty());
    }

    #[test]
    fn test_swappable_tokens_cover_registry() {
        let reg = registry();
        let ctl = controller(reg.clone(), StaticInvoker::default());
        let tokens = ctl.swappable_tokens();
        assert_eq!(tokens.len(), reg.tokens().len());
        assert_eq!(tokens[0].symbol, reg.tokens()[0].symbol);
    }
}
