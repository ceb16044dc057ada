use std::collections::{BTreeMap, HashSet};

use log::debug;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub mod error;

use crate::rpc::error::RpcError;

/// The three wallet daemon calls this tool depends on.
///
/// `WalletRpc` implements this against a live daemon; tests drive the
/// provisioning and ranking logic with an in-memory wallet instead.
pub trait WalletApi {
    /// Names of every account the wallet currently knows.
    fn list_accounts(&self) -> Result<HashSet<String>, RpcError>;

    /// Primary deposit address for `account`. The wallet creates the
    /// account if it does not have it yet, and mints a fresh address
    /// when called again for an account that already has one.
    fn account_address(&self, account: &str) -> Result<String, RpcError>;

    /// Total funds received across the account's addresses.
    fn balance(&self, account: &str) -> Result<Decimal, RpcError>;
}

/// Blocking JSON-RPC client for a bitcoin-style wallet daemon on the
/// local machine. Calls are not retried; any failure aborts the run.
pub struct WalletRpc {
    client: reqwest::blocking::Client,
    url: String,
    user: String,
    password: String,
}

impl WalletRpc {
    pub fn new(user: &str, password: &str, port: u16) -> Result<Self, RpcError> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            client,
            url: format!("http://127.0.0.1:{port}/"),
            user: user.to_string(),
            password: password.to_string(),
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        debug!("rpc call {method}");
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: "coinrank",
            method,
            params,
        };
        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.password))
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Http { status });
        }
        let envelope: RpcResponse<T> = response.json()?;
        if let Some(err) = envelope.error {
            return Err(RpcError::Server {
                method: method.to_string(),
                code: err.code,
                message: err.message,
            });
        }
        envelope.result.ok_or_else(|| RpcError::MissingResult {
            method: method.to_string(),
        })
    }
}

impl WalletApi for WalletRpc {
    fn list_accounts(&self) -> Result<HashSet<String>, RpcError> {
        // listaccounts maps account name to balance; only the names
        // matter here.
        let accounts: BTreeMap<String, Value> = self.call("listaccounts", json!([]))?;
        Ok(accounts.into_keys().collect())
    }

    fn account_address(&self, account: &str) -> Result<String, RpcError> {
        self.call("getaccountaddress", json!([account]))
    }

    fn balance(&self, account: &str) -> Result<Decimal, RpcError> {
        self.call("getbalance", json!([account]))
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    id: &'a str,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
    #[allow(dead_code)]
    id: Option<Value>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}
