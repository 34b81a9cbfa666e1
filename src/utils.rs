use ethers_core::types::{Address, U256};
use ethers_core::utils::{format_units, parse_ether};
use gloo_timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use yew::UseStateHandle;

use crate::error::{DashboardError, Result};

/// `0x` followed by 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn parse_recipient(recipient: &str) -> Result<Address> {
    let recipient = recipient.trim();
    if !is_valid_address(recipient) {
        return Err(DashboardError::Validation("Invalid recipient address".into()));
    }
    recipient
        .parse::<Address>()
        .map_err(|_| DashboardError::Validation("Invalid recipient address".into()))
}

const ETHER_DECIMALS: usize = 18;

fn is_decimal_literal(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.matches('.').count() <= 1
}

/// Native-unit amount ("0.5") to base units at 18 decimals.
pub fn parse_amount(amount: &str) -> Result<U256> {
    let amount = amount.trim();
    if !is_decimal_literal(amount) {
        return Err(DashboardError::Validation("Amount must be a positive number".into()));
    }
    let fraction_digits = amount.split_once('.').map_or(0, |(_, frac)| frac.len());
    if fraction_digits > ETHER_DECIMALS {
        return Err(DashboardError::Validation(format!(
            "Amount supports at most {} decimal places",
            ETHER_DECIMALS
        )));
    }
    let value = parse_ether(amount)
        .map_err(|e| DashboardError::Validation(format!("Invalid amount: {}", e)))?;
    if value.is_zero() {
        return Err(DashboardError::Validation("Amount must be a positive number".into()));
    }
    Ok(value)
}

/// Decimal rendering of `raw` at `decimals`, used when the client sends no `formatted`.
pub fn format_raw_balance(raw: U256, decimals: u8) -> String {
    format_units(raw, u32::from(decimals)).unwrap_or_else(|_| raw.to_string())
}

/// Fixed-point truncation of a decimal string to `precision` fraction digits.
pub fn format_with_precision(value: &str, precision: usize) -> String {
    let value = value.trim();
    let (int, frac) = value.split_once('.').unwrap_or((value, ""));
    if (int.is_empty() && frac.is_empty())
        || !int.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return "0".to_string();
    }

    let int = match int.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    if precision == 0 {
        return int.to_string();
    }

    let mut frac: String = frac.chars().take(precision).collect();
    while frac.len() < precision {
        frac.push('0');
    }
    format!("{}.{}", int, frac)
}

pub fn clear_status_after_delay(status: UseStateHandle<String>, delay_ms: u32) {
    Timeout::new(delay_ms, move || status.set(String::new())).forget();
}

pub fn get_error_message(err: &JsValue) -> String {
    for field in ["message", "shortMessage", "error"] {
        if let Ok(val) = Reflect::get(err, &field.into()) {
            if let Some(s) = val.as_string() {
                return s;
            }
        }
    }

    if let Some(s) = err.as_string() {
        return s;
    }

    if let Ok(str_val) = js_sys::JSON::stringify(err) {
        if let Some(s) = str_val.as_string() {
            return s;
        }
    }

    "Unknown error (failed to extract message)".to_string()
}
