//! Well-known endpoints and protocol constants
//!
//! Public, keyless RPC endpoints and the price API location. Operator-supplied
//! endpoints are layered on top of these by [`crate::MoodboardConfig`].

use alloy_chains::NamedChain;

/// Chains whose gas price feeds the mood score
pub const TRACKED_CHAINS: [NamedChain; 2] = [NamedChain::Mainnet, NamedChain::Base];

/// Public Ethereum mainnet RPC endpoints, in priority order
pub const ETHEREUM_PUBLIC_RPCS: &[&str] = &[
    "https://cloudflare-eth.com",
    "https://rpc.ankr.com/eth",
    "https://ethereum.publicnode.com",
];

/// Public Base RPC endpoints, in priority order
pub const BASE_PUBLIC_RPCS: &[&str] = &[
    "https://mainnet.base.org",
    "https://rpc.ankr.com/base",
    "https://base.publicnode.com",
];

/// CoinGecko simple price endpoint
pub const COINGECKO_SIMPLE_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// User agent sent with every outbound request
pub const USER_AGENT: &str = "mood-board/1.0";

/// Per-call RPC timeout (milliseconds)
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 8_000;

/// Price API request timeout (milliseconds)
pub const DEFAULT_PRICE_TIMEOUT_MS: u64 = 10_000;

/// Number of recent blocks requested from `eth_feeHistory`
pub const FEE_HISTORY_BLOCK_COUNT: u64 = 5;

/// Public fallback RPC endpoints for a chain; empty for untracked chains
pub fn public_rpc_endpoints(chain: NamedChain) -> &'static [&'static str] {
    match chain {
        NamedChain::Mainnet => ETHEREUM_PUBLIC_RPCS,
        NamedChain::Base => BASE_PUBLIC_RPCS,
        _ => &[],
    }
}

/// Environment variable holding the operator's preferred RPC endpoint for a chain
pub fn rpc_url_env_var(chain: NamedChain) -> Option<&'static str> {
    match chain {
        NamedChain::Mainnet => Some("ETH_RPC_URL"),
        NamedChain::Base => Some("BASE_RPC_URL"),
        _ => None,
    }
}
