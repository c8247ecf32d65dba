//! Health endpoint reporting the backing stores

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use aegis_core::repositories::{RevocationCache, TokenRepository, UserRepository};
use aegis_infra::cache::RedisClient;
use aegis_infra::database::DatabasePool;
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use tracing::warn;

use crate::routes::AppState;

/// Result of probing one component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComponentHealth {
    pub fn up(detail: Option<String>) -> Self {
        Self { healthy: true, detail }
    }

    pub fn down() -> Self {
        Self {
            healthy: false,
            detail: None,
        }
    }
}

/// A component `/health` reports on
pub trait HealthProbe: Send + Sync {
    fn component(&self) -> &'static str;

    fn probe(&self) -> LocalBoxFuture<'_, ComponentHealth>;
}

impl HealthProbe for DatabasePool {
    fn component(&self) -> &'static str {
        "database"
    }

    fn probe(&self) -> LocalBoxFuture<'_, ComponentHealth> {
        Box::pin(async move {
            match self.health_check().await {
                Ok(true) => ComponentHealth::up(Some(self.get_statistics().to_string())),
                Ok(false) => ComponentHealth::down(),
                Err(e) => {
                    warn!(error = %e, "Database probe failed");
                    ComponentHealth::down()
                }
            }
        })
    }
}

impl HealthProbe for RedisClient {
    fn component(&self) -> &'static str {
        "cache"
    }

    fn probe(&self) -> LocalBoxFuture<'_, ComponentHealth> {
        Box::pin(async move {
            match self.health_check().await {
                Ok(true) => ComponentHealth::up(None),
                Ok(false) => ComponentHealth::down(),
                Err(e) => {
                    warn!(error = %e, "Cache probe failed");
                    ComponentHealth::down()
                }
            }
        })
    }
}

/// Components checked on every `/health` request
#[derive(Clone, Default)]
pub struct HealthChecks {
    probes: Vec<Arc<dyn HealthProbe>>,
}

impl HealthChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Probe every component in order
    pub async fn run(&self) -> BTreeMap<&'static str, ComponentHealth> {
        let mut results = BTreeMap::new();
        for probe in &self.probes {
            results.insert(probe.component(), probe.probe().await);
        }
        results
    }
}

/// Health check endpoint handler
///
/// 200 when every component answers, 503 otherwise.
pub async fn health_check<T, U, C>(state: web::Data<AppState<T, U, C>>) -> HttpResponse
where
    T: TokenRepository + 'static,
    U: UserRepository + 'static,
    C: RevocationCache + 'static,
{
    let components = state.health.run().await;
    let healthy = components.values().all(|component| component.healthy);

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "aegis-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": components,
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
