//! # Lifecycle Hooks
//!
//! An explicit dispatch table of extension points, filled in by the binary at
//! startup and frozen behind an `Arc` once the server starts.
//!
//! | Event | Trait | Registered with |
//! |---|---|---|
//! | bootstrap | [`BootstrapHook`] | [`Hooks::on_bootstrap`] |
//! | record before create | [`RecordCreateHook`] | [`Hooks::on_record_before_create`] |
//!
//! ```rust,no_run
//! use lib_core::hooks::{Hooks, ShoppingListCreateLogger};
//! use lib_core::settings::SmtpEnvHook;
//!
//! let mut hooks = Hooks::new();
//! hooks.on_bootstrap(SmtpEnvHook);
//! hooks.on_record_before_create("shopping_lists", ShoppingListCreateLogger);
//! ```

use crate::error::{AppError, Result};
use crate::settings::Settings;
use lib_utils::envs::EnvSource;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a hook that may stop the operation it observes.
#[derive(Debug)]
pub enum HookOutcome {
    /// Let the operation proceed.
    Continue,
    /// Abort the operation with this error.
    Reject(AppError),
}

/// Runs once while the settings value is being built.
pub trait BootstrapHook: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return the settings with this hook's changes applied.
    fn apply(&self, env: &dyn EnvSource, settings: Settings) -> Settings;
}

/// A record about to be inserted.
#[derive(Debug)]
pub struct RecordCreateEvent<'a> {
    pub collection: &'a str,
    /// Id assigned to the record before it is persisted.
    pub id: &'a str,
    pub record: &'a Value,
}

/// Runs before a record is inserted into a collection.
pub trait RecordCreateHook: Send + Sync {
    fn before_create(&self, event: &RecordCreateEvent<'_>) -> HookOutcome;
}

/// Typed table of registered hooks.
#[derive(Default)]
pub struct Hooks {
    bootstrap: Vec<Box<dyn BootstrapHook>>,
    record_create: HashMap<String, Vec<Arc<dyn RecordCreateHook>>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_bootstrap(&mut self, hook: impl BootstrapHook + 'static) -> &mut Self {
        self.bootstrap.push(Box::new(hook));
        self
    }

    pub fn on_record_before_create(
        &mut self,
        collection: impl Into<String>,
        hook: impl RecordCreateHook + 'static,
    ) -> &mut Self {
        self.record_create
            .entry(collection.into())
            .or_default()
            .push(Arc::new(hook));
        self
    }

    /// Fold every bootstrap hook, in registration order, over `base`.
    pub fn run_bootstrap(&self, env: &dyn EnvSource, base: Settings) -> Settings {
        self.bootstrap.iter().fold(base, |settings, hook| {
            debug!(hook = hook.name(), "Running bootstrap hook");
            hook.apply(env, settings)
        })
    }

    /// Run the before-create hooks registered for the event's collection.
    ///
    /// The first rejection wins and later hooks are not called.
    pub fn trigger_record_before_create(&self, event: &RecordCreateEvent<'_>) -> Result<()> {
        let Some(hooks) = self.record_create.get(event.collection) else {
            return Ok(());
        };

        for hook in hooks {
            if let HookOutcome::Reject(err) = hook.before_create(event) {
                debug!(collection = event.collection, id = event.id, "Record creation rejected by hook");
                return Err(err);
            }
        }

        Ok(())
    }
}

/// Logs the pending id of every new shopping list.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShoppingListCreateLogger;

impl RecordCreateHook for ShoppingListCreateLogger {
    fn before_create(&self, event: &RecordCreateEvent<'_>) -> HookOutcome {
        info!(id = event.id, "Creating new shopping list: {}", event.id);
        HookOutcome::Continue
    }
}

// endregion: --- Tests
