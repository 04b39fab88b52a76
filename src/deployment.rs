use crate::{
    FACTORY_ADDRESS,
    TARGET_CHAIN_ID,
};
use chrono::Utc;
use color_eyre::eyre::{
    Result,
    WrapErr,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    fs,
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};

pub const LEDGER_ROOT: &str = ".pools";
const LEDGER_FILE: &str = "pools.json";

/// Which endpoint serves the target chain. The chain itself never varies
/// (`TARGET_CHAIN_ID`); a local node is expected to be a fork of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetEnv {
    Sepolia,
    Local,
}

impl TargetEnv {
    pub fn dir_name(self) -> &'static str {
        match self {
            TargetEnv::Sepolia => "sepolia",
            TargetEnv::Local => "local",
        }
    }

    pub fn default_rpc_url(self) -> &'static str {
        match self {
            TargetEnv::Sepolia => "https://rpc.sepolia.org",
            TargetEnv::Local => "http://localhost:8545/",
        }
    }
}

impl fmt::Display for TargetEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetEnv::Sepolia => "Sepolia",
            TargetEnv::Local => "Local",
        };
        write!(f, "{name}")
    }
}

/// The fixed deployment a run is pointed at: RPC endpoint, required chain id
/// and the factory address. Everything but the endpoint URL is a constant.
#[derive(Clone, Debug)]
pub struct TargetProfile {
    pub env: TargetEnv,
    pub rpc_url: String,
    pub chain_id: u64,
    pub factory: String,
}

impl TargetProfile {
    pub fn resolve(env: TargetEnv, rpc_override: Option<String>) -> Self {
        let rpc_url = rpc_override.unwrap_or_else(|| env.default_rpc_url().to_string());
        Self {
            env,
            rpc_url,
            chain_id: TARGET_CHAIN_ID,
            factory: FACTORY_ADDRESS.to_string(),
        }
    }
}

/// One successfully created pool, as recorded after the creation transaction
/// confirmed with its event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolRecord {
    pub created_at: String,
    pub pool: String,
    pub token_a: String,
    pub token_b: String,
    pub fee: u32,
    pub tx_hash: String,
    pub network_url: String,
}

#[derive(Debug)]
pub struct PoolLedger {
    path: PathBuf,
}

impl PoolLedger {
    pub fn new(env: TargetEnv) -> Result<Self> {
        let path = ensure_store(env)?;
        Ok(Self { path })
    }

    pub fn load(&self) -> Result<Vec<PoolRecord>> {
        read_records(&self.path)
    }

    pub fn append(&self, record: PoolRecord) -> Result<()> {
        let mut records = self.load()?;
        records.push(record);
        write_records(&self.path, &records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn record_pool(
    env: TargetEnv,
    pool: impl AsRef<str>,
    token_a: impl AsRef<str>,
    token_b: impl AsRef<str>,
    fee: u32,
    tx_hash: impl AsRef<str>,
    network_url: impl AsRef<str>,
) -> Result<()> {
    let ledger = PoolLedger::new(env)?;
    let record = PoolRecord {
        created_at: Utc::now().to_rfc3339(),
        pool: pool.as_ref().to_string(),
        token_a: token_a.as_ref().to_string(),
        token_b: token_b.as_ref().to_string(),
        fee,
        tx_hash: tx_hash.as_ref().to_string(),
        network_url: network_url.as_ref().to_string(),
    };
    ledger.append(record)
}

fn ensure_store(env: TargetEnv) -> Result<PathBuf> {
    let root = Path::new(LEDGER_ROOT);
    if !root.exists() {
        fs::create_dir_all(root).wrap_err("Failed to create .pools directory")?;
    }

    let env_dir = root.join(env.dir_name());
    if !env_dir.exists() {
        fs::create_dir_all(&env_dir).wrap_err_with(|| {
            format!("Failed to create .pools/{} directory", env.dir_name())
        })?;
    }

    let file_path = env_dir.join(LEDGER_FILE);
    if !file_path.exists() {
        let mut file = fs::File::create(&file_path).wrap_err_with(|| {
            format!("Failed to create pool record file for {env} at {file_path:?}")
        })?;
        file.write_all(b"[]")
            .wrap_err_with(|| format!("Failed to initialize pool record file for {env}"))?;
    }

    Ok(file_path)
}

fn read_records(path: impl AsRef<Path>) -> Result<Vec<PoolRecord>> {
    let data = fs::read(path.as_ref()).wrap_err("Failed to read pool records")?;
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let records = serde_json::from_slice::<Vec<PoolRecord>>(&data)
        .wrap_err("Failed to parse pool records JSON")?;
    Ok(records)
}

fn write_records(path: impl AsRef<Path>, records: &[PoolRecord]) -> Result<()> {
    let json =
        serde_json::to_vec_pretty(records).wrap_err("Failed to serialize pool records")?;
    fs::write(path.as_ref(), json).wrap_err("Failed to write pool records")?;
    Ok(())
}
