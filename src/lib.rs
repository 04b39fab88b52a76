pub mod calls;

pub mod deployment;

pub mod error;

pub mod gateway;

pub mod keystore;

pub mod network;

pub mod provider;

pub mod session;

pub mod state;

pub mod test_helpers;

pub mod wallets;

pub mod factory_abi {
    use ethers::prelude::abigen;

    abigen!(
        UniswapV3Factory,
        r#"[
            function createPool(address tokenA, address tokenB, uint24 fee) external returns (address pool)
            function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool)
            function feeAmountTickSpacing(uint24 fee) external view returns (int24)
            function parameters() external view returns (address factory, address token0, address token1, uint24 fee, int24 tickSpacing)
            event PoolCreated(address indexed token0, address indexed token1, uint24 indexed fee, int24 tickSpacing, address pool)
        ]"#
    );
}

/// Address of the target factory deployment (Sepolia).
pub const FACTORY_ADDRESS: &str = "0x0227628f3F023bb0B980b67D528571c95c6DaC1c";

/// Chain id every call must execute against.
pub const TARGET_CHAIN_ID: u64 = 11_155_111;
