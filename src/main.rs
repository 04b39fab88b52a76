use clap::{
    ArgGroup,
    Parser,
    Subcommand,
};
use color_eyre::eyre::Result;
use factory_client::{
    calls::{
        CallOutput,
        Operation,
        OperationRequest,
    },
    deployment::{
        TargetEnv,
        TargetProfile,
        record_pool,
    },
    gateway::ContractGateway,
    keystore::KeystoreWallet,
    wallets::resolve_wallet_dir,
};
use std::sync::OnceLock;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling,
};
use tracing_subscriber::{
    EnvFilter,
    fmt,
};

#[derive(Parser, Debug)]
#[command(
    name = "factory-client",
    about = "Interact with the pool factory contract (create, look up, inspect)",
    version,
    group(
        ArgGroup::new("network")
            .args(["sepolia", "local"])
    )
)]
struct Args {
    /// Use the public Sepolia endpoint (default)
    #[arg(long)]
    sepolia: bool,

    /// Use a local node forking the target chain
    #[arg(long)]
    local: bool,

    /// Override RPC URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Keystore wallet name
    #[arg(long, default_value = "default")]
    wallet: String,

    /// Override keystore directory (defaults to ~/.factory-client/wallets)
    #[arg(long)]
    wallet_dir: Option<String>,

    #[command(subcommand)]
    operation: OperationCommand,
}

#[derive(Subcommand, Debug)]
enum OperationCommand {
    /// Create a pool for a token pair and fee tier
    CreatePool {
        #[arg(long)]
        token_a: String,
        #[arg(long)]
        token_b: String,
        #[arg(long)]
        fee: u32,
    },
    /// Look up the pool for a token pair and fee tier
    GetPool {
        #[arg(long)]
        token_a: String,
        #[arg(long)]
        token_b: String,
        #[arg(long)]
        fee: u32,
    },
    /// Read the tick spacing of a fee tier
    TickSpacing {
        #[arg(long)]
        fee: u32,
    },
    /// Read the factory's transient pool parameters
    Parameters,
}

impl OperationCommand {
    fn to_request(&self) -> OperationRequest {
        match self {
            OperationCommand::CreatePool {
                token_a,
                token_b,
                fee,
            } => OperationRequest::new(Operation::CreatePool)
                .token_a(token_a)
                .token_b(token_b)
                .fee(*fee),
            OperationCommand::GetPool {
                token_a,
                token_b,
                fee,
            } => OperationRequest::new(Operation::GetPool)
                .token_a(token_a)
                .token_b(token_b)
                .fee(*fee),
            OperationCommand::TickSpacing { fee } => {
                OperationRequest::new(Operation::FeeAmountTickSpacing).fee(*fee)
            }
            OperationCommand::Parameters => OperationRequest::new(Operation::Parameters),
        }
    }
}

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn init_tracing() {
    let file_appender = rolling::daily("logs", "factory-client.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    let _ = LOG_GUARD.set(guard);
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args = Args::parse();
    let env = if args.local {
        TargetEnv::Local
    } else {
        TargetEnv::Sepolia
    };
    let target = TargetProfile::resolve(env, args.rpc_url.clone());
    let wallet_dir = resolve_wallet_dir(args.wallet_dir.as_deref())?;
    let detected = KeystoreWallet::detect(&target, &wallet_dir, &args.wallet);

    let request = args.operation.to_request();
    let mut gateway = ContractGateway::new(detected, target.chain_id);
    gateway.execute(request.clone()).await;

    if let Some(failure) = gateway.state().error() {
        eprintln!("{failure}");
        std::process::exit(1);
    }
    if let Some(output) = gateway.state().result() {
        println!("{output}");
        if let (
            CallOutput::PoolAddress(pool),
            Operation::CreatePool,
            Some(receipt),
        ) = (output, request.operation, gateway.last_receipt())
        {
            record_pool(
                target.env,
                format!("{pool:?}"),
                request.token_a.as_deref().unwrap_or_default(),
                request.token_b.as_deref().unwrap_or_default(),
                request.fee.unwrap_or_default(),
                &receipt.tx_hash,
                &target.rpc_url,
            )?;
        }
    }
    Ok(())
}
