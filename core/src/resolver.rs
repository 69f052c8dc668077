//! # Reverse DNS
//!
//! Best-effort PTR lookups. A resolver never fails from the caller's point of
//! view: anything other than a usable name becomes [`UNRESOLVABLE`].

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use pingr_common::record::UNRESOLVABLE;
use tracing::debug;

use crate::scheduler;

/// Wall-clock ceiling for a single reverse lookup.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

#[async_trait]
pub trait HostnameResolver: Send + Sync {
    /// Name for `address`, or [`UNRESOLVABLE`].
    async fn resolve(&self, address: IpAddr) -> String;
}

pub struct DnsResolver {
    inner: TokioResolver,
    ceiling: Duration,
}

impl DnsResolver {
    /// Uses the system resolver configuration, or Cloudflare's public servers
    /// when that cannot be read.
    pub fn new(ceiling: Duration) -> Self {
        match TokioResolver::builder_tokio() {
            Ok(builder) => Self {
                inner: builder.with_options(lookup_options(ceiling)).build(),
                ceiling,
            },
            Err(e) => {
                debug!("System resolver config unavailable ({e}), using public servers");
                Self::with_config(ResolverConfig::cloudflare(), ceiling)
            }
        }
    }

    pub fn with_config(config: ResolverConfig, ceiling: Duration) -> Self {
        let inner: TokioResolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(lookup_options(ceiling))
                .build();

        Self { inner, ceiling }
    }
}

/// One attempt, bounded by the same ceiling as the outer timeout.
fn lookup_options(ceiling: Duration) -> ResolverOpts {
    let mut opts: ResolverOpts = ResolverOpts::default();
    opts.timeout = ceiling;
    opts.attempts = 1;
    opts
}

/// First usable PTR name, without the root label dot.
fn tidy_name(name: &str) -> Option<String> {
    let name: &str = name.trim_end_matches('.');
    (!name.is_empty()).then(|| name.to_string())
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new(LOOKUP_TIMEOUT)
    }
}

#[async_trait]
impl HostnameResolver for DnsResolver {
    async fn resolve(&self, address: IpAddr) -> String {
        let lookup = match tokio::time::timeout(self.ceiling, self.inner.reverse_lookup(address)).await {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(e)) => {
                debug!("PTR {address}: {e}");
                return UNRESOLVABLE.to_string();
            }
            Err(_) => {
                debug!("PTR {address}: no answer within {}ms", self.ceiling.as_millis());
                return UNRESOLVABLE.to_string();
            }
        };

        lookup
            .iter()
            .find_map(|ptr| tidy_name(&ptr.0.to_utf8()))
            .unwrap_or_else(|| UNRESOLVABLE.to_string())
    }
}

/// Resolves every address with at most `concurrency` lookups in flight.
///
/// The returned map has one entry per distinct address.
pub async fn resolve_all(
    resolver: Arc<dyn HostnameResolver>,
    addresses: &[IpAddr],
    concurrency: usize,
) -> HashMap<IpAddr, String> {
    scheduler::fan_out(
        addresses,
        concurrency,
        move |address| {
            let resolver = resolver.clone();
            async move { resolver.resolve(address).await }
        },
        |_| UNRESOLVABLE.to_string(),
        None,
    )
    .await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
