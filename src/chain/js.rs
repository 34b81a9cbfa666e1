use std::cell::Cell;

use ethers_core::types::{Address, U256};
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use js_sys::{Array, BigInt, Function, Object, Promise, Reflect};
use log::{debug, error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use yew::Callback;

use super::{BlockSubscription, ChainClient};
use crate::error::{DashboardError, Result};
use crate::models::{AssetKey, BalanceRecord, BlockSummary, BlockTx, NetworkInfo, Receipt, ReceiptStatus, TxHash};
use crate::utils::{format_raw_balance, get_error_message};

/// Chain client backed by a JS object published on `window`.
#[derive(Clone)]
pub struct JsChainClient {
    inner: JsValue,
    /// Used when a balance response omits `decimals`.
    default_decimals: u8,
    warned_async: Cell<bool>,
}

impl JsChainClient {
    pub fn from_window(namespace: &str, default_decimals: u8) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| DashboardError::Unavailable("No window".into()))?;
        let inner = Reflect::get(&window, &namespace.into())
            .map_err(|_| DashboardError::Unavailable(format!("window.{} is not readable", namespace)))?;
        if inner.is_undefined() || inner.is_null() {
            return Err(DashboardError::Unavailable(format!("window.{} not found", namespace)));
        }
        info!("Using chain client at window.{}", namespace);
        Ok(Self {
            inner,
            default_decimals,
            warned_async: Cell::new(false),
        })
    }

    fn method(&self, name: &str) -> Result<Function> {
        Reflect::get(&self.inner, &name.into())
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| DashboardError::Unavailable(format!("{} is not a function", name)))
    }

    /// Calls `name` synchronously; the returned value may still be a Promise.
    fn call(&self, name: &str, args: &[JsValue]) -> std::result::Result<JsValue, String> {
        let func = self.method(name).map_err(|e| e.to_string())?;
        let args: Array = args.iter().collect();
        Reflect::apply(&func, &self.inner, &args).map_err(|e| get_error_message(&e))
    }

    /// Calls a connection getter, which is polled and must answer synchronously.
    fn call_sync(&self, name: &str) -> Option<JsValue> {
        let value = self
            .call(name, &[])
            .map_err(|e| error!("{} failed: {}", name, e))
            .ok()?;
        if let Err(e) = sync_only(name, is_thenable(&value)) {
            if !self.warned_async.replace(true) {
                warn!("{}", e);
            }
            return None;
        }
        Some(value)
    }
}

fn is_thenable(value: &JsValue) -> bool {
    value.is_instance_of::<Promise>() || field(value, "then").is_function()
}

fn sync_only(name: &str, thenable: bool) -> Result<()> {
    if thenable {
        return Err(DashboardError::Unavailable(format!(
            "{} returned a Promise; connection getters must return plain values",
            name
        )));
    }
    Ok(())
}

async fn settle(value: JsValue) -> std::result::Result<JsValue, String> {
    JsFuture::from(Promise::resolve(&value))
        .await
        .map_err(|e| get_error_message(&e))
}

fn field(obj: &JsValue, name: &str) -> JsValue {
    Reflect::get(obj, &name.into()).unwrap_or(JsValue::UNDEFINED)
}

fn js_to_u256(value: &JsValue) -> Option<U256> {
    if value.is_bigint() {
        let digits: String = BigInt::from(value.clone()).to_string(10).ok()?.into();
        return U256::from_dec_str(&digits).ok();
    }
    if let Some(s) = value.as_string() {
        return match s.strip_prefix("0x") {
            Some(hex) => U256::from_str_radix(hex, 16).ok(),
            None => U256::from_dec_str(&s).ok(),
        };
    }
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
        .map(|n| U256::from(n as u64))
}

fn js_to_u64(value: &JsValue) -> Option<u64> {
    js_to_u256(value).filter(|v| v.bits() <= 64).map(|v| v.as_u64())
}

fn js_to_address(value: &JsValue) -> Option<Address> {
    value.as_string().and_then(|s| s.parse::<Address>().ok())
}

fn decode_balance(value: &JsValue, default_decimals: u8) -> Result<BalanceRecord> {
    let raw_value = js_to_u256(&field(value, "value"))
        .ok_or_else(|| DashboardError::Network("Balance response has no numeric value".into()))?;
    let decimals = js_to_u64(&field(value, "decimals"))
        .and_then(|d| u8::try_from(d).ok())
        .unwrap_or(default_decimals);
    let formatted_value = field(value, "formatted")
        .as_string()
        .unwrap_or_else(|| format_raw_balance(raw_value, decimals));
    let symbol = field(value, "symbol").as_string().unwrap_or_default();
    Ok(BalanceRecord {
        raw_value,
        formatted_value,
        symbol,
        decimals,
    })
}

fn decode_receipt(hash: TxHash, value: &JsValue) -> Receipt {
    let status = field(value, "status");
    let success = match status.as_string() {
        Some(s) => s == "success" || s == "0x1" || s == "1",
        None => status.as_bool().unwrap_or(false) || status.as_f64() == Some(1.0),
    };
    Receipt {
        hash,
        status: if success { ReceiptStatus::Success } else { ReceiptStatus::Failure },
    }
}

fn decode_block(value: &JsValue) -> BlockSummary {
    let txs = field(value, "transactions");
    let transactions = if Array::is_array(&txs) {
        Array::from(&txs)
            .iter()
            // Bare hashes carry no parties to match against.
            .filter(|tx| tx.is_object())
            .map(|tx| BlockTx {
                from: js_to_address(&field(&tx, "from")),
                to: js_to_address(&field(&tx, "to")),
            })
            .collect()
    } else {
        Vec::new()
    };
    BlockSummary {
        number: js_to_u64(&field(value, "number")),
        transactions,
    }
}

impl ChainClient for JsChainClient {
    fn get_balance(&self, account: Address, asset: AssetKey) -> LocalBoxFuture<'static, Result<BalanceRecord>> {
        let call = self.call(
            "getBalance",
            &[JsValue::from_str(&format!("{:#x}", account)), JsValue::from_str(&asset.as_param())],
        );
        let default_decimals = self.default_decimals;
        async move {
            let value = settle(call.map_err(DashboardError::Network)?)
                .await
                .map_err(DashboardError::Network)?;
            decode_balance(&value, default_decimals)
        }
        .boxed_local()
    }

    fn send_transaction(&self, to: Address, value: U256) -> LocalBoxFuture<'static, Result<TxHash>> {
        let request = Object::new();
        let call = BigInt::new(&JsValue::from_str(&value.to_string()))
            .map_err(|e| get_error_message(&JsValue::from(e)))
            .and_then(|amount| {
                Reflect::set(&request, &"to".into(), &JsValue::from_str(&format!("{:#x}", to)))
                    .and_then(|_| Reflect::set(&request, &"value".into(), &amount))
                    .map_err(|e| get_error_message(&e))?;
                self.call("sendTransaction", &[request.into()])
            });
        async move {
            let value = settle(call.map_err(DashboardError::Submission)?)
                .await
                .map_err(DashboardError::Submission)?;
            let hash = value
                .as_string()
                .ok_or_else(|| DashboardError::Submission("Client returned no transaction hash".into()))?;
            hash.parse::<TxHash>().map_err(DashboardError::Submission)
        }
        .boxed_local()
    }

    fn wait_for_receipt(&self, hash: TxHash, confirmations: u32) -> LocalBoxFuture<'static, Result<Receipt>> {
        let call = self.call(
            "waitForReceipt",
            &[JsValue::from_str(&hash.to_string()), JsValue::from(confirmations)],
        );
        async move {
            let value = settle(call.map_err(DashboardError::Network)?)
                .await
                .map_err(DashboardError::Network)?;
            Ok(decode_receipt(hash, &value))
        }
        .boxed_local()
    }

    fn watch_blocks(&self, on_block: Callback<BlockSummary>) -> Result<BlockSubscription> {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |block: JsValue| {
            let summary = decode_block(&block);
            debug!("Block {:?} with {} transaction(s)", summary.number, summary.transactions.len());
            on_block.emit(summary);
        });
        let unwatch = self
            .method("watchBlocks")?
            .call1(&self.inner, closure.as_ref().unchecked_ref())
            .map_err(|e| DashboardError::Network(get_error_message(&e)))?
            .dyn_into::<Function>()
            .ok();
        Ok(BlockSubscription::new(move || {
            if let Some(unwatch) = unwatch {
                if let Err(e) = unwatch.call0(&JsValue::NULL) {
                    error!("Failed to unsubscribe from blocks: {}", get_error_message(&e));
                }
            }
            drop(closure);
        }))
    }

    fn get_connected_account(&self) -> Option<Address> {
        self.call_sync("getConnectedAccount").and_then(|value| js_to_address(&value))
    }

    fn get_current_network(&self) -> Option<NetworkInfo> {
        let value = self.call_sync("getCurrentNetwork")?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        serde_wasm_bindgen::from_value::<NetworkInfo>(value)
            .map_err(|e| error!("Failed to decode network info: {:?}", e))
            .ok()
    }
}
