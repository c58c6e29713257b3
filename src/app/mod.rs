//! Host-facing entry point: per-list-type normalizers plus the active configuration.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::PreviewConfig;
use crate::coordinator::{ItemNormalizer, PreviewCoordinator};
use crate::error::PreviewResult;
use crate::host::{AttachError, PreviewRenderer, SuggestionList};
use crate::preview::{PreviewRegistry, PreviewTarget};

struct Registration {
    list_type: &'static str,
    // Always an `ItemNormalizer<L::Item>` for the list type it is keyed by.
    normalizer: Box<dyn Any>,
}

/// Registers which list types get hold-to-preview and attaches coordinators to them.
pub struct QuickPreview {
    config: PreviewConfig,
    registry: PreviewRegistry,
    registrations: HashMap<TypeId, Registration>,
}

impl QuickPreview {
    pub fn new(config: PreviewConfig) -> Self {
        Self::with_registry(config, PreviewRegistry::shared())
    }

    pub fn with_registry(config: PreviewConfig, registry: PreviewRegistry) -> Self {
        Self {
            config,
            registry,
            registrations: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Takes effect for lists attached after the call.
    pub fn set_config(&mut self, config: PreviewConfig) {
        self.config = config;
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    pub fn register<L>(&mut self, normalizer: impl Fn(&L::Item) -> Option<PreviewTarget> + 'static)
    where
        L: SuggestionList + 'static,
        L::Item: 'static,
    {
        let normalizer: ItemNormalizer<L::Item> = Rc::new(normalizer);
        let list_type = type_name::<L>();
        let previous = self.registrations.insert(
            TypeId::of::<L>(),
            Registration {
                list_type,
                normalizer: Box::new(normalizer),
            },
        );
        if previous.is_some() {
            tracing::debug!(list_type, "replaced item normalizer");
        } else {
            tracing::debug!(list_type, "registered item normalizer");
        }
    }

    pub fn unregister<L>(&mut self) -> bool
    where
        L: SuggestionList + 'static,
    {
        self.registrations.remove(&TypeId::of::<L>()).is_some()
    }

    pub fn is_registered<L>(&self) -> bool
    where
        L: SuggestionList + 'static,
    {
        self.registrations.contains_key(&TypeId::of::<L>())
    }

    /// Call when a list opens; the returned coordinator lives until the list closes.
    pub fn attach<L, R>(&self, list: L, renderer: R) -> PreviewResult<PreviewCoordinator<L, R>>
    where
        L: SuggestionList + 'static,
        L::Item: 'static,
        R: PreviewRenderer,
    {
        let normalizer = self
            .registrations
            .get(&TypeId::of::<L>())
            .and_then(|registration| {
                registration
                    .normalizer
                    .downcast_ref::<ItemNormalizer<L::Item>>()
            })
            .cloned();
        let Some(normalizer) = normalizer else {
            let list_type = type_name::<L>();
            tracing::error!(list_type, "no item normalizer registered; quick preview disabled");
            return Err(AttachError::UnregisteredList { list_type }.into());
        };

        let coordinator = PreviewCoordinator::attach(
            list,
            renderer,
            normalizer,
            self.config.clone(),
            self.registry.clone(),
        )?;
        Ok(coordinator)
    }

    /// Drops every registration and hides whatever preview is open.
    pub fn shutdown(&mut self) {
        let dropped: Vec<&'static str> = self
            .registrations
            .drain()
            .map(|(_, registration)| registration.list_type)
            .collect();
        self.registry.evict_all();
        tracing::info!(?dropped, "quick preview shut down");
    }
}
