//! Redundant quote sources.
//!
//! The two vendors serve the same data through different formats. A
//! `QuoteFeed` asks them in order and keeps the first usable quote; misses are
//! logged and never retried.
use log::{debug, info};
use serde::Serialize;
use strum_macros::{Display, EnumString};
use waneng_common::net::Endpoint;
use waneng_common::{Quote, Symbol};

use crate::script::ScriptLoader;
use crate::{sina, tencent};

/// A quote vendor.
#[derive(Debug, Clone, Copy, Serialize, Display, EnumString, Hash, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// hq.sinajs.cn, comma separated records.
    Sina,
    /// qt.gtimg.cn, tilde separated records.
    Tencent,
}

impl QuoteSource {
    /// Order used when the caller has no preference.
    pub const FALLBACK_ORDER: [QuoteSource; 2] = [QuoteSource::Tencent, QuoteSource::Sina];

    /// Public endpoint of this vendor.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            QuoteSource::Sina => Endpoint::sina(),
            QuoteSource::Tencent => Endpoint::tencent(),
        }
    }

    /// Parse a raw record in this vendor's format.
    pub fn parse(&self, raw: &str) -> Option<Quote> {
        match self {
            QuoteSource::Sina => sina::parse(raw),
            QuoteSource::Tencent => tencent::parse(raw),
        }
    }

    /// Fetch from `endpoint`, which must speak this vendor's format.
    pub async fn fetch_from(
        &self,
        loader: &ScriptLoader,
        endpoint: &Endpoint,
        symbol: &Symbol,
    ) -> Option<Quote> {
        match self {
            QuoteSource::Sina => sina::fetch_from(loader, endpoint, symbol).await,
            QuoteSource::Tencent => tencent::fetch_from(loader, endpoint, symbol).await,
        }
    }
}

/// A quote together with the vendor that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcedQuote {
    /// Vendor that answered.
    pub source: QuoteSource,
    /// The quote itself.
    pub quote: Quote,
}

/// Ordered list of sources sharing one loader.
#[derive(Debug, Clone)]
pub struct QuoteFeed {
    loader: ScriptLoader,
    routes: Vec<(QuoteSource, Endpoint)>,
}

impl QuoteFeed {
    /// Feed trying `sources` in the given order against their public endpoints.
    pub fn new(loader: ScriptLoader, sources: &[QuoteSource]) -> Self {
        let routes = sources.iter().map(|s| (*s, s.endpoint())).collect();
        QuoteFeed { loader, routes }
    }

    /// Point `source` at another endpoint.
    pub fn with_endpoint(mut self, source: QuoteSource, endpoint: Endpoint) -> Self {
        for route in self.routes.iter_mut().filter(|route| route.0 == source) {
            route.1 = endpoint.clone();
        }
        self
    }

    /// Sources in the order they are asked.
    pub fn sources(&self) -> Vec<QuoteSource> {
        self.routes.iter().map(|(s, _)| *s).collect()
    }

    /// First quote any source returns for `symbol`, `None` when all miss.
    pub async fn quote(&self, symbol: &Symbol) -> Option<SourcedQuote> {
        for (source, endpoint) in &self.routes {
            match source.fetch_from(&self.loader, endpoint, symbol).await {
                Some(quote) => {
                    debug!("{} answered for {}: {}", source, symbol, quote.raw);
                    return Some(SourcedQuote {
                        source: *source,
                        quote,
                    });
                }
                None => info!("No quote for {} from {}", symbol, source),
            }
        }
        None
    }
}
