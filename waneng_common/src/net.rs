//! Vendor endpoints and small request helpers.
use chrono::Utc;
use url::form_urlencoded;

use crate::symbol::Symbol;

/// Vendor A (Sina) quote script host.
pub const SINA_BASE: &str = "https://hq.sinajs.cn";
/// Vendor A refuses requests without a finance referer.
pub const SINA_REFERER: &str = "https://finance.sina.com.cn";
/// Vendor B (Tencent) quote script host.
pub const TENCENT_BASE: &str = "https://qt.gtimg.cn";
/// Charset of both vendors' script bodies.
pub const VENDOR_CHARSET: &str = "gbk";

/// Where a vendor script lives and which global it assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Scheme and host, without a trailing slash.
    pub base: String,
    /// Path segment holding the symbol, e.g. `list` in `/list=sz000543`.
    pub query_key: &'static str,
    /// Prefix of the global binding, e.g. `hq_str_`.
    pub binding_prefix: &'static str,
    /// Optional `Referer` header value.
    pub referer: Option<&'static str>,
}

impl Endpoint {
    /// Vendor A endpoint.
    pub fn sina() -> Self {
        Endpoint {
            base: SINA_BASE.to_string(),
            query_key: "list",
            binding_prefix: "hq_str_",
            referer: Some(SINA_REFERER),
        }
    }

    /// Vendor B endpoint.
    pub fn tencent() -> Self {
        Endpoint {
            base: TENCENT_BASE.to_string(),
            query_key: "q",
            binding_prefix: "v_",
            referer: None,
        }
    }

    /// Same endpoint served from another base URL (mirrors, local test servers).
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = base.trim_end_matches('/').to_string();
        self
    }

    /// Request URL for `symbol` with the given cache buster.
    pub fn url(&self, symbol: &Symbol, cache_buster: i64) -> String {
        format!(
            "{}/{}={}&_={}",
            self.base,
            self.query_key,
            encode_component(&symbol.to_string()),
            cache_buster
        )
    }

    /// Binding the vendor script writes for `symbol`.
    pub fn binding_key(&self, symbol: &Symbol) -> String {
        symbol.binding_key(self.binding_prefix)
    }
}

/// Current Unix time in milliseconds, used to defeat intermediate caches.
pub fn cache_buster() -> i64 {
    Utc::now().timestamp_millis()
}

/// Form-encode a query component.
pub fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
