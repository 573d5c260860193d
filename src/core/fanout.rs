use crate::domain::model::{Credentials, QueryOutcome, QueryResult, QuerySpec, SessionMap, Target};
use crate::domain::ports::FabricApi;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Logs in to every target at once. Targets that fail are left out of the map,
/// which is keyed by each target's index in `targets`.
pub async fn build_sessions(
    api: Arc<dyn FabricApi>,
    targets: &[Target],
    credentials: &Credentials,
) -> SessionMap {
    let mut tasks = JoinSet::new();
    let mut names = HashMap::new();

    for (index, target) in targets.iter().enumerate() {
        tracing::info!("Authenticating against host: {}", target.name);
        let name = target.name.clone();
        let api = Arc::clone(&api);
        let target = target.clone();
        let credentials = credentials.clone();
        let handle = tasks.spawn(async move {
            let result = api.login(&target, &credentials).await;
            (index, target.name, result)
        });
        names.insert(handle.id(), name);
    }

    let mut sessions = SessionMap::new();
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_, (index, name, Ok(session)))) => {
                tracing::debug!("Session established for {}", name);
                sessions.insert(index, session);
            }
            Ok((_, (_, name, Err(e)))) => {
                tracing::error!(
                    "Unable to build session to host: {}, any queries will not be run against this host.",
                    name
                );
                tracing::debug!("{}", e);
            }
            Err(e) => {
                let name = names.get(&e.id()).map(String::as_str).unwrap_or("<unknown>");
                tracing::error!("Login task for {} did not complete: {}", name, e);
            }
        }
    }

    tracing::info!(
        "🔐 {}/{} hosts authenticated",
        sessions.len(),
        targets.len()
    );
    sessions
}

/// Runs `query` against every target. One result per target, in completion order.
/// `sessions` must come from `build_sessions` over the same `targets` slice.
pub async fn run_queries(
    api: Arc<dyn FabricApi>,
    targets: &[Target],
    sessions: &SessionMap,
    query: Arc<QuerySpec>,
) -> Vec<QueryResult> {
    let mut tasks = JoinSet::new();
    let mut names = HashMap::new();
    let mut results = Vec::with_capacity(targets.len());

    for (index, target) in targets.iter().enumerate() {
        let Some(session) = sessions.get(&index).cloned() else {
            tracing::debug!(
                "{} has no authenticated client and as such no query will be run.",
                target.name
            );
            results.push(QueryResult {
                host: target.name.clone(),
                outcome: QueryOutcome::NotAuthenticated,
            });
            continue;
        };

        tracing::info!("Running {} query against host: {}", query_kind(&query), target.name);
        let name = target.name.clone();
        let api = Arc::clone(&api);
        let target = target.clone();
        let query = Arc::clone(&query);
        let handle = tasks.spawn(async move {
            let outcome = match api.query(&target, &session, &query).await {
                Ok(payload) => QueryOutcome::Payload(payload),
                Err(e) => {
                    tracing::error!("Unable to query to host: {}", target.name);
                    tracing::debug!("{}", e);
                    QueryOutcome::Failed(e.to_string())
                }
            };
            QueryResult {
                host: target.name,
                outcome,
            }
        });
        names.insert(handle.id(), name);
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_, result)) => results.push(result),
            Err(e) => {
                let name = names
                    .get(&e.id())
                    .cloned()
                    .unwrap_or_else(|| "<unknown>".to_string());
                tracing::error!("Query task for {} did not complete: {}", name, e);
                results.push(QueryResult {
                    host: name,
                    outcome: QueryOutcome::Failed(e.to_string()),
                });
            }
        }
    }
    results
}

fn query_kind(query: &QuerySpec) -> &'static str {
    if query.as_str().contains("uribv4Route") {
        "route"
    } else {
        "endpoint"
    }
}
