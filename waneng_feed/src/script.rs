//! Script-injection requests.
//!
//! The vendors only publish self-executing scripts such as
//! `var hq_str_sz000543="...";`. Instead of handing the body to a JavaScript
//! engine, the loader evaluates the string assignments it contains into a
//! private `BindingScope` and reads back the one binding it registered for.
//!
//! Every call owns its scope, so two in-flight requests for the same symbol
//! never see each other's value. Failures of any kind come back as `None`
//! after being logged.
use std::collections::HashMap;

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::REFERER;
use waneng_common::net::{Endpoint, VENDOR_CHARSET, cache_buster};
use waneng_common::{BoardError, Result, Symbol};

/// Bindings written by one executed script.
///
/// Registered for a single key, read at most once, and cleared when dropped,
/// whichever way the request ended.
#[derive(Debug)]
pub struct BindingScope {
    key: String,
    bindings: HashMap<String, String>,
}

impl BindingScope {
    /// Open a scope waiting for `key`.
    pub fn register(key: String) -> Self {
        BindingScope {
            key,
            bindings: HashMap::new(),
        }
    }

    /// Key this scope was registered for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Run the string assignments of `script`, returning how many were bound.
    pub fn execute(&mut self, script: &str) -> usize {
        let mut bound = 0;
        for (name, value) in Assignments::new(script) {
            self.bindings.insert(name, value);
            bound += 1;
        }
        bound
    }

    /// Take the registered binding. Empty values count as missing.
    pub fn take(&mut self) -> Option<String> {
        self.bindings.remove(&self.key).filter(|v| !v.is_empty())
    }
}

impl Drop for BindingScope {
    fn drop(&mut self) {
        if !self.bindings.is_empty() {
            debug!(
                "Discarding {} unread binding(s) next to {}",
                self.bindings.len(),
                self.key
            );
        }
        self.bindings.clear();
    }
}

/// Iterator over `name = "literal"` statements of a script body.
///
/// An optional `var`/`let`/`const` keyword is accepted. Statements that are
/// not a plain string assignment are skipped up to the next `;` or newline.
struct Assignments {
    chars: Vec<char>,
    pos: usize,
}

impl Assignments {
    fn new(script: &str) -> Self {
        Assignments {
            chars: script.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace() && c != '\n') {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace() || c == ';') {
            self.pos += 1;
        }
    }

    fn skip_statement(&mut self) {
        while let Some(c) = self.peek() {
            if c == ';' || c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn identifier(&mut self) -> Option<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '$') {
            self.pos += 1;
        }
        if self.pos == start || self.chars[start].is_ascii_digit() {
            return None;
        }
        Some(self.chars[start..self.pos].iter().collect())
    }

    fn string_literal(&mut self) -> Option<String> {
        let quote = self.peek().filter(|c| *c == '"' || *c == '\'')?;
        self.pos += 1;
        let mut out = String::new();
        loop {
            let c = self.peek()?;
            self.pos += 1;
            match c {
                c if c == quote => return Some(out),
                '\n' => return None,
                '\\' => {
                    let escaped = self.peek()?;
                    self.pos += 1;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '0' => out.push('\0'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        'v' => out.push('\u{b}'),
                        'x' => out.push(self.hex_escape(2)?),
                        'u' => out.push(self.hex_escape(4)?),
                        other => out.push(other),
                    }
                }
                other => out.push(other),
            }
        }
    }

    /// `\xHH` and `\uHHHH`; `digits` hex digits follow the escape letter.
    fn hex_escape(&mut self, digits: usize) -> Option<char> {
        let hex: String = self.chars.get(self.pos..self.pos + digits)?.iter().collect();
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let code = u32::from_str_radix(&hex, 16).ok()?;
        self.pos += digits;
        char::from_u32(code)
    }

    fn assignment(&mut self) -> Option<(String, String)> {
        let mut name = self.identifier()?;
        if matches!(name.as_str(), "var" | "let" | "const") {
            self.skip_blanks();
            name = self.identifier()?;
        }
        self.skip_blanks();
        if self.peek() != Some('=') {
            return None;
        }
        self.pos += 1;
        self.skip_blanks();
        let value = self.string_literal()?;
        Some((name, value))
    }
}

impl Iterator for Assignments {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_separators();
            self.peek()?;
            let start = self.pos;
            match self.assignment() {
                Some(binding) => return Some(binding),
                None => {
                    if self.pos == start {
                        self.pos += 1;
                    }
                    self.skip_statement();
                }
            }
        }
    }
}

/// Loads vendor scripts over HTTP. Cheap to clone; clones share a connection pool.
#[derive(Debug, Clone)]
pub struct ScriptLoader {
    client: Client,
}

impl ScriptLoader {
    /// Build a loader sending `user_agent`. No request timeout is configured.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(ScriptLoader { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        ScriptLoader { client }
    }

    /// Fetch and execute the vendor script for `symbol`, then read the
    /// binding it was expected to assign.
    pub async fn load(&self, endpoint: &Endpoint, symbol: &Symbol) -> Option<String> {
        let mut scope = BindingScope::register(endpoint.binding_key(symbol));
        let url = endpoint.url(symbol, cache_buster());

        let script = match self.fetch_script(endpoint, &url).await {
            Ok(script) => script,
            Err(e) => {
                warn!("Script load failed for {}: {}", url, e);
                return None;
            }
        };
        let bound = scope.execute(&script);
        debug!("Executed {} ({} binding(s))", url, bound);

        let raw = scope.take();
        if raw.is_none() {
            warn!("Script from {} never populated {}", url, scope.key());
        }
        raw
    }

    async fn fetch_script(&self, endpoint: &Endpoint, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(referer) = endpoint.referer {
            request = request.header(REFERER, referer);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BoardError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text_with_charset(VENDOR_CHARSET).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{self, Reply};

    fn scope(key: &str, script: &str) -> BindingScope {
        let mut scope = BindingScope::register(key.to_string());
        scope.execute(script);
        scope
    }

    #[test]
    fn reads_var_assignment() {
        let mut s = scope(
            "hq_str_sz000543",
            "var hq_str_sz000543=\"皖能电力,8.65,8.70\";\n",
        );
        assert_eq!(s.take().as_deref(), Some("皖能电力,8.65,8.70"));
    }

    #[test]
    fn reads_bare_assignment_among_several() {
        let mut s = scope(
            "v_sz000543",
            "v_sh600000=\"1~浦发银行~600000\"; v_sz000543=\"51~皖能电力~000543~8.72\";",
        );
        assert_eq!(s.take().as_deref(), Some("51~皖能电力~000543~8.72"));
    }

    #[test]
    fn take_is_read_once() {
        let mut s = scope("v_x", "v_x=\"1\";");
        assert!(s.take().is_some());
        assert!(s.take().is_none());
    }

    #[test]
    fn missing_or_empty_binding_is_absent() {
        assert!(scope("hq_str_sz000543", "var hq_str_sz000543=\"\";").take().is_none());
        assert!(scope("hq_str_sz000543", "var hq_str_sh600000=\"x\";").take().is_none());
        assert!(scope("hq_str_sz000543", "").take().is_none());
        assert!(scope("hq_str_sz000543", "<html>404</html>").take().is_none());
    }

    #[test]
    fn skips_statements_that_are_not_string_assignments() {
        let mut s = scope(
            "v_b",
            "window.foo(1); v_a = 42;\nlet v_b = 'two; three';",
        );
        assert_eq!(s.take().as_deref(), Some("two; three"));
    }

    #[test]
    fn decodes_escapes() {
        let mut s = scope("k", r#"k="a\"b\\c中\n";"#);
        assert_eq!(s.take().as_deref(), Some("a\"b\\c中\n"));
    }

    #[test]
    fn decodes_control_and_hex_escapes() {
        let mut s = scope("k", r#"k="\x41\b\f\v\u4e2d\q";"#);
        assert_eq!(s.take().as_deref(), Some("A\u{8}\u{c}\u{b}中q"));
    }

    #[test]
    fn malformed_hex_escape_binds_nothing() {
        let mut s = BindingScope::register("k".to_string());
        assert_eq!(s.execute(r#"k="\x4";"#), 0);
        assert!(s.take().is_none());
    }

    #[test]
    fn unterminated_literal_binds_nothing() {
        let mut s = BindingScope::register("k".to_string());
        assert_eq!(s.execute("var k=\"open"), 0);
        assert!(s.take().is_none());
    }

    #[tokio::test]
    async fn loads_binding_over_http() {
        let server = test_server::spawn(|_| {
            Reply::ok("var hq_str_sz000543=\"皖能电力,8.65\";\nvar other=\"x\";")
        })
        .await;
        let endpoint = Endpoint::sina().with_base(&server.base);
        let symbol: Symbol = "sz000543".parse().unwrap();

        let raw = test_server::loader().load(&endpoint, &symbol).await;
        assert_eq!(raw.as_deref(), Some("皖能电力,8.65"));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("GET /list=sz000543&_="));
        let head = requests[0].to_ascii_lowercase();
        assert!(head.contains("referer: https://finance.sina.com.cn"));
    }

    #[tokio::test]
    async fn every_request_carries_a_cache_buster() {
        let server = test_server::spawn(|_| Reply::ok("v_sz000543=\"1~a~b~2\";")).await;
        let endpoint = Endpoint::tencent().with_base(&server.base);
        let symbol: Symbol = "sz000543".parse().unwrap();
        let loader = test_server::loader();

        loader.load(&endpoint, &symbol).await;
        loader.load(&endpoint, &symbol).await;

        for request in server.requests() {
            let line = request.lines().next().unwrap();
            let buster = line
                .split("&_=")
                .nth(1)
                .and_then(|rest| rest.split(' ').next())
                .unwrap();
            assert!(buster.parse::<i64>().unwrap() > 0);
        }
    }

    #[tokio::test]
    async fn error_status_is_absent() {
        let server = test_server::spawn(|_| Reply::status(502, "v_sz000543=\"1~a~b~2\";")).await;
        let endpoint = Endpoint::tencent().with_base(&server.base);
        let symbol: Symbol = "sz000543".parse().unwrap();
        assert!(test_server::loader().load(&endpoint, &symbol).await.is_none());
    }

    #[tokio::test]
    async fn unreachable_host_is_absent() {
        let endpoint = Endpoint::tencent().with_base(&test_server::closed_base().await);
        let symbol: Symbol = "sz000543".parse().unwrap();
        assert!(test_server::loader().load(&endpoint, &symbol).await.is_none());
    }

    #[tokio::test]
    async fn concurrent_same_symbol_loads_do_not_share_bindings() {
        let server = test_server::spawn(|request| {
            // Each response echoes its own cache buster so callers can tell them apart.
            let buster = request
                .split("&_=")
                .nth(1)
                .and_then(|rest| rest.split(' ').next())
                .unwrap_or("")
                .to_string();
            Reply::ok(&format!("v_sz000543=\"{}\";", buster))
        })
        .await;
        let endpoint = Endpoint::tencent().with_base(&server.base);
        let symbol: Symbol = "sz000543".parse().unwrap();
        let loader = test_server::loader();

        let (a, b) = tokio::join!(
            loader.load(&endpoint, &symbol),
            loader.load(&endpoint, &symbol)
        );
        let mut seen = vec![a.unwrap(), b.unwrap()];
        seen.sort();
        let mut sent: Vec<String> = server
            .requests()
            .iter()
            .filter_map(|r| r.split("&_=").nth(1)?.split(' ').next().map(str::to_string))
            .collect();
        sent.sort();
        assert_eq!(seen, sent);
    }
}
