// Create / read / update / delete / import

use serde_json::Value;
use sonarr_api::SonarrClient;
use sonarr_api::endpoint::SINGLETON_ID;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{
    Lifecycle, ManagedResource, Outcome, SingletonWrite, find_by, guarded, host_name,
};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::CoreError;
use crate::sensitive::SensitiveRegister;

// ── Create ───────────────────────────────────────────────────────────

/// Send the plan. Collections are POSTed with id 0; singletons are PUT at
/// id 1 and never POSTed.
pub async fn create<R: ManagedResource>(
    client: &SonarrClient,
    plan: &R::State,
    cancel: &CancellationToken,
) -> Outcome<R::State> {
    debug!(resource = R::TYPE_NAME, "creating");
    let register = R::capture_sensitive(plan);
    let mut diagnostics = Diagnostics::default();
    R::check(plan, &mut diagnostics);

    let mut body = plan.clone();
    let response: Result<R::Wire, CoreError> = match R::LIFECYCLE {
        Lifecycle::Singleton { write } => {
            R::set_identifier(&mut body, SINGLETON_ID);
            write_singleton::<R>(client, write, &body, cancel).await
        }
        Lifecycle::Collection | Lifecycle::Immutable => {
            R::set_identifier(&mut body, 0);
            match R::build_wire(&body) {
                Ok(wire) => guarded(cancel, client.create(R::ENDPOINT, &wire)).await,
                Err(e) => Err(e),
            }
        }
    };

    let outcome = settle::<R>("create", plan, &register, response, diagnostics);
    if let Some(ref state) = outcome.state {
        info!(resource = R::TYPE_NAME, id = R::identifier(state), "created");
    }
    outcome
}

// ── Read ─────────────────────────────────────────────────────────────

/// Refresh from the server. A 404 yields an absent outcome with no error.
pub async fn read<R: ManagedResource>(
    client: &SonarrClient,
    prior: &R::State,
    cancel: &CancellationToken,
) -> Outcome<R::State> {
    refresh::<R>("read", client, prior, cancel).await
}

async fn refresh<R: ManagedResource>(
    verb: &str,
    client: &SonarrClient,
    prior: &R::State,
    cancel: &CancellationToken,
) -> Outcome<R::State> {
    let id = R::identifier(prior);
    debug!(resource = R::TYPE_NAME, id, "reading");
    let register = R::capture_sensitive(prior);

    let response: Result<R::Wire, CoreError> = match R::LIFECYCLE {
        Lifecycle::Singleton { .. } => guarded(cancel, client.fetch_singleton(R::ENDPOINT)).await,
        Lifecycle::Collection | Lifecycle::Immutable => {
            guarded(cancel, client.fetch(R::ENDPOINT, id)).await
        }
    };

    match response {
        Err(ref e) if e.is_not_found() => {
            info!(resource = R::TYPE_NAME, id, "resource disappeared");
            Outcome::absent(Diagnostics::default())
        }
        response => settle::<R>(verb, prior, &register, response, Diagnostics::default()),
    }
}

// ── Update ───────────────────────────────────────────────────────────

/// Send the plan under the prior id. The id is never changed.
pub async fn update<R: ManagedResource>(
    client: &SonarrClient,
    plan: &R::State,
    prior: &R::State,
    cancel: &CancellationToken,
) -> Outcome<R::State> {
    let id = R::identifier(prior);
    debug!(resource = R::TYPE_NAME, id, "updating");
    let register = R::capture_sensitive(plan);
    let mut diagnostics = Diagnostics::default();
    R::check(plan, &mut diagnostics);

    let mut body = plan.clone();
    R::set_identifier(&mut body, id);
    let response: Result<R::Wire, CoreError> = match R::LIFECYCLE {
        Lifecycle::Singleton { write } => write_singleton::<R>(client, write, &body, cancel).await,
        Lifecycle::Collection => match R::build_wire(&body) {
            Ok(wire) => guarded(cancel, client.update(R::ENDPOINT, id, &wire)).await,
            Err(e) => Err(e),
        },
        Lifecycle::Immutable => guarded(cancel, client.fetch(R::ENDPOINT, id)).await,
    };

    let mut outcome = settle::<R>("update", plan, &register, response, diagnostics);
    if let Some(ref mut state) = outcome.state {
        R::set_identifier(state, id);
        info!(resource = R::TYPE_NAME, id, "updated");
    }
    outcome
}

// ── Delete ───────────────────────────────────────────────────────────

/// Remove the resource. Already gone counts as success; singletons are
/// only dropped from host state.
pub async fn delete<R: ManagedResource>(
    client: &SonarrClient,
    prior: &R::State,
    cancel: &CancellationToken,
) -> Outcome<R::State> {
    let id = R::identifier(prior);
    if matches!(R::LIFECYCLE, Lifecycle::Singleton { .. }) {
        debug!(resource = R::TYPE_NAME, "singleton dropped from state");
        return Outcome::absent(Diagnostics::default());
    }

    debug!(resource = R::TYPE_NAME, id, "deleting");
    match guarded(cancel, client.remove(R::ENDPOINT, id)).await {
        Ok(()) => {
            info!(resource = R::TYPE_NAME, id, "deleted");
            Outcome::absent(Diagnostics::default())
        }
        Err(e) if e.is_not_found() => {
            debug!(resource = R::TYPE_NAME, id, "already gone");
            Outcome::absent(Diagnostics::default())
        }
        Err(e) => {
            let mut diagnostics: Diagnostics =
                Diagnostic::from_error("delete", &host_name::<R>(), &e).into();
            diagnostics.scrub(&R::capture_sensitive(prior));
            Outcome::absent(diagnostics)
        }
    }
}

// ── Import ───────────────────────────────────────────────────────────

/// Seed state from the identifier, then read. Non-numeric identifiers are
/// looked up by `IMPORT_KEY` where the resource has one.
pub async fn import<R: ManagedResource>(
    client: &SonarrClient,
    identifier: &str,
    cancel: &CancellationToken,
) -> Outcome<R::State> {
    debug!(resource = R::TYPE_NAME, "importing");
    let seed = match (R::import_seed(identifier), R::IMPORT_KEY) {
        (Ok(seed), _) => seed,
        (Err(CoreError::UnexpectedImportIdentifier { .. }), Some(key)) => {
            let wanted = Value::String(identifier.to_owned());
            match find_by::<R>(client, key, &wanted, cancel).await {
                Ok(mut found) => {
                    // Listed secrets are the server's redacted form.
                    R::restore_sensitive(&mut found, &SensitiveRegister::default());
                    found
                }
                Err(e) => return Outcome::failed("import", &host_name::<R>(), &e),
            }
        }
        (Err(e), _) => return Outcome::failed("import", &host_name::<R>(), &e),
    };

    // The seed's sensitive register scrubs identifiers that carry a secret.
    let mut outcome = refresh::<R>("import", client, &seed, cancel).await;
    if outcome.state.is_none() && outcome.is_ok() {
        let err = CoreError::NotFound {
            entity_type: R::TYPE_NAME.to_owned(),
            key: "id".to_owned(),
            value: R::identifier(&seed).to_string(),
        };
        outcome
            .diagnostics
            .push(Diagnostic::from_error("import", &host_name::<R>(), &err));
    }
    outcome
}

// ── Internals ────────────────────────────────────────────────────────

async fn write_singleton<R: ManagedResource>(
    client: &SonarrClient,
    write: SingletonWrite,
    body: &R::State,
    cancel: &CancellationToken,
) -> Result<R::Wire, CoreError> {
    let wire = R::build_wire(body)?;
    match write {
        SingletonWrite::ById => {
            guarded(cancel, client.update(R::ENDPOINT, SINGLETON_ID, &wire)).await
        }
        SingletonWrite::Path(path) => guarded(cancel, client.replace(path, &wire)).await,
    }
}

/// Apply the server's answer: decode, restore secrets, reconcile against
/// `baseline`. Any failure becomes a single scrubbed diagnostic and no state.
fn settle<R: ManagedResource>(
    verb: &str,
    baseline: &R::State,
    register: &SensitiveRegister,
    response: Result<R::Wire, CoreError>,
    mut diagnostics: Diagnostics,
) -> Outcome<R::State> {
    let applied = response.and_then(|wire| {
        let mut fresh = R::apply_wire(wire)?;
        R::restore_sensitive(&mut fresh, register);
        R::reconcile(baseline, &mut fresh);
        Ok(fresh)
    });

    match applied {
        Ok(state) => {
            diagnostics.scrub(register);
            Outcome::present(state, diagnostics)
        }
        Err(e) => {
            debug!(resource = R::TYPE_NAME, verb, "operation failed");
            diagnostics.push(Diagnostic::from_error(verb, &host_name::<R>(), &e));
            diagnostics.scrub(register);
            Outcome::absent(diagnostics)
        }
    }
}
