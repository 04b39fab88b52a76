use crate::error::Failure;
use ethers::types::Address;
use std::fmt;

/// The callable surface of the factory contract. One variant per function
/// descriptor; the descriptor itself lives in `factory_abi`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    CreatePool,
    GetPool,
    FeeAmountTickSpacing,
    Parameters,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mutability {
    Read,
    Write,
}

/// Raw form inputs for one operation, before any typing. Addresses stay
/// strings and fields stay optional so the presentation layer can hand them
/// over as collected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub token_a: Option<String>,
    pub token_b: Option<String>,
    pub fee: Option<u32>,
}

impl OperationRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            token_a: None,
            token_b: None,
            fee: None,
        }
    }

    pub fn token_a(mut self, raw: impl Into<String>) -> Self {
        self.token_a = Some(raw.into());
        self
    }

    pub fn token_b(mut self, raw: impl Into<String>) -> Self {
        self.token_b = Some(raw.into());
        self
    }

    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Types the request against the interface descriptor. Only presence and
    /// address syntax are checked here; everything else is the contract's
    /// business.
    pub fn into_call(self) -> Result<FactoryCall, Failure> {
        match self.operation {
            Operation::CreatePool => {
                let (token_a, token_b) = require_pair(self.token_a, self.token_b)?;
                let fee = require(self.fee, "fee")?;
                Ok(FactoryCall::CreatePool {
                    token_a,
                    token_b,
                    fee,
                })
            }
            Operation::GetPool => {
                let (token_a, token_b) = require_pair(self.token_a, self.token_b)?;
                let fee = require(self.fee, "fee")?;
                Ok(FactoryCall::GetPool {
                    token_a,
                    token_b,
                    fee,
                })
            }
            Operation::FeeAmountTickSpacing => {
                let fee = require(self.fee, "fee")?;
                Ok(FactoryCall::FeeAmountTickSpacing { fee })
            }
            Operation::Parameters => Ok(FactoryCall::Parameters),
        }
    }
}

fn require<T>(field: Option<T>, name: &str) -> Result<T, Failure> {
    field.ok_or_else(|| Failure::BadRequest(format!("missing {name}")))
}

fn require_pair(
    token_a: Option<String>,
    token_b: Option<String>,
) -> Result<(Address, Address), Failure> {
    let token_a = parse_address(&require(token_a, "token_a")?, "token_a")?;
    let token_b = parse_address(&require(token_b, "token_b")?, "token_b")?;
    Ok((token_a, token_b))
}

fn parse_address(raw: &str, name: &str) -> Result<Address, Failure> {
    raw.parse::<Address>()
        .map_err(|_| Failure::BadRequest(format!("{name} is not a valid address: {raw}")))
}

/// A typed call ready for the bound contract handle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FactoryCall {
    CreatePool {
        token_a: Address,
        token_b: Address,
        fee: u32,
    },
    GetPool {
        token_a: Address,
        token_b: Address,
        fee: u32,
    },
    FeeAmountTickSpacing {
        fee: u32,
    },
    Parameters,
}

impl FactoryCall {
    pub fn mutability(&self) -> Mutability {
        match self {
            FactoryCall::CreatePool { .. } => Mutability::Write,
            FactoryCall::GetPool { .. }
            | FactoryCall::FeeAmountTickSpacing { .. }
            | FactoryCall::Parameters => Mutability::Read,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FactoryCall::CreatePool { .. } => "createPool",
            FactoryCall::GetPool { .. } => "getPool",
            FactoryCall::FeeAmountTickSpacing { .. } => "feeAmountTickSpacing",
            FactoryCall::Parameters => "parameters",
        }
    }
}

/// Transient pool parameters as read from the factory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactoryParameters {
    pub factory: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
}

/// Decoded return value of a completed call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallOutput {
    PoolAddress(Address),
    TickSpacing(i32),
    Parameters(FactoryParameters),
}

impl fmt::Display for CallOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallOutput::PoolAddress(pool) => write!(f, "{pool:?}"),
            CallOutput::TickSpacing(spacing) => write!(f, "{spacing}"),
            CallOutput::Parameters(params) => write!(
                f,
                "factory={:?} token0={:?} token1={:?} fee={} tickSpacing={}",
                params.factory, params.token0, params.token1, params.fee, params.tick_spacing
            ),
        }
    }
}

/// The pool-creation event a write call is expected to emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreated {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub pool: Address,
}

/// Summary of a confirmed write: the transaction hash plus the recognized
/// event, when one was present in the receipt's logs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriteReceipt {
    pub tx_hash: String,
    pub pool_created: Option<PoolCreated>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_A: &str = "0x00000000000000000000000000000000000000aa";
    const TOKEN_B: &str = "0x00000000000000000000000000000000000000bb";

    #[test]
    fn into_call__types_a_complete_create_pool_request() {
        let request = OperationRequest::new(Operation::CreatePool)
            .token_a(TOKEN_A)
            .token_b(TOKEN_B)
            .fee(3000);

        let call = request.into_call().unwrap();

        assert_eq!(call.mutability(), Mutability::Write);
        assert_eq!(call.name(), "createPool");
    }

    #[test]
    fn into_call__missing_fee_is_a_bad_request() {
        let request = OperationRequest::new(Operation::FeeAmountTickSpacing);

        let err = request.into_call().unwrap_err();

        assert_eq!(err, Failure::BadRequest("missing fee".into()));
    }

    #[test]
    fn into_call__rejects_malformed_address() {
        let request = OperationRequest::new(Operation::GetPool)
            .token_a("not-an-address")
            .token_b(TOKEN_B)
            .fee(500);

        let err = request.into_call().unwrap_err();

        assert!(matches!(err, Failure::BadRequest(msg) if msg.contains("token_a")));
    }

    #[test]
    fn into_call__parameters_needs_no_arguments() {
        let call = OperationRequest::new(Operation::Parameters)
            .into_call()
            .unwrap();

        assert_eq!(call, FactoryCall::Parameters);
        assert_eq!(call.mutability(), Mutability::Read);
    }
}
