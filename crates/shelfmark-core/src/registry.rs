//! The static catalog of bulk actions.
//!
//! The registry is built once at startup and never mutated per request.
//! Insertion order is significant: it is the order the UI lists actions in.

use serde::{Deserialize, Serialize};

use shelfmark_contracts::{
    action::{BulkOperation, DisplayMode, ExportFormat},
    capability::Capability,
};

pub const EMAIL: &str = "email";
pub const CITATION: &str = "citation";
pub const UPDATE_ACCESS_CONTROL: &str = "update_access_control";
pub const MOVE: &str = "move";
pub const PUBLISH: &str = "publish";
pub const UNPUBLISH: &str = "unpublish";
pub const DELETE: &str = "delete";

/// One entry in the action catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Name the UI submits to invoke the action.
    pub name: String,
    /// The handler the action is bound to.
    pub operation: BulkOperation,
    pub display_mode: DisplayMode,
}

impl ActionDescriptor {
    pub fn new(name: impl Into<String>, operation: BulkOperation, display_mode: DisplayMode) -> Self {
        Self {
            name: name.into(),
            operation,
            display_mode,
        }
    }

    /// An action that needs a confirmation form.
    pub fn form(name: impl Into<String>, operation: BulkOperation) -> Self {
        Self::new(name, operation, DisplayMode::Form)
    }

    /// An action invoked immediately.
    pub fn formless(name: impl Into<String>, operation: BulkOperation) -> Self {
        Self::new(name, operation, DisplayMode::Formless)
    }

    pub fn required_capabilities(&self) -> &'static [Capability] {
        self.operation.required_capabilities()
    }
}

/// Ordered catalog of action descriptors, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog every bookmark list starts from: export by email and as
    /// citations.
    pub fn base() -> Self {
        let mut registry = Self::new();
        registry.register(ActionDescriptor::form(EMAIL, BulkOperation::Export(ExportFormat::Email)));
        registry.register(ActionDescriptor::form(
            CITATION,
            BulkOperation::Export(ExportFormat::Citation),
        ));
        registry
    }

    /// The media repository catalog.
    ///
    /// Export actions are suppressed; the five bulk mutations are added in
    /// toolbar order.
    pub fn repository() -> Self {
        let mut registry = Self::base();
        registry.unregister(EMAIL);
        registry.unregister(CITATION);

        registry.register(ActionDescriptor::form(
            UPDATE_ACCESS_CONTROL,
            BulkOperation::UpdateAccessControl,
        ));
        registry.register(ActionDescriptor::form(MOVE, BulkOperation::Move));
        registry.register(ActionDescriptor::formless(PUBLISH, BulkOperation::Publish));
        registry.register(ActionDescriptor::formless(UNPUBLISH, BulkOperation::Unpublish));
        registry.register(ActionDescriptor::form(DELETE, BulkOperation::Delete));
        registry
    }

    /// Add `descriptor`, replacing any action with the same name in place.
    pub fn register(&mut self, descriptor: ActionDescriptor) {
        match self.actions.iter_mut().find(|a| a.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => self.actions.push(descriptor),
        }
    }

    /// Remove the action called `name`, returning it if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<ActionDescriptor> {
        let idx = self.actions.iter().position(|a| a.name == name)?;
        Some(self.actions.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&ActionDescriptor> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Every registered action, in insertion order.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_catalog_drops_exports_and_keeps_toolbar_order() {
        let registry = ActionRegistry::repository();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![UPDATE_ACCESS_CONTROL, MOVE, PUBLISH, UNPUBLISH, DELETE]
        );
        assert!(registry.get(EMAIL).is_none());
        assert!(registry.get(CITATION).is_none());
    }

    #[test]
    fn status_actions_are_formless() {
        let registry = ActionRegistry::repository();
        assert_eq!(registry.get(PUBLISH).unwrap().display_mode, DisplayMode::Formless);
        assert_eq!(registry.get(UNPUBLISH).unwrap().display_mode, DisplayMode::Formless);
        assert_eq!(registry.get(DELETE).unwrap().display_mode, DisplayMode::Form);
        assert_eq!(registry.get(MOVE).unwrap().display_mode, DisplayMode::Form);
    }

    #[test]
    fn register_replaces_in_place() {
        let mut registry = ActionRegistry::repository();
        registry.register(ActionDescriptor::formless(MOVE, BulkOperation::Move));

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.all()[1].name, MOVE);
        assert_eq!(registry.all()[1].display_mode, DisplayMode::Formless);
    }

    #[test]
    fn register_appends_new_names() {
        let mut registry = ActionRegistry::new();
        assert!(registry.is_empty());
        registry.register(ActionDescriptor::form("archive", BulkOperation::Delete));
        registry.register(ActionDescriptor::form("purge", BulkOperation::Delete));
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["archive", "purge"]);
    }

    #[test]
    fn unregister_returns_removed_descriptor() {
        let mut registry = ActionRegistry::base();
        let removed = registry.unregister(EMAIL).unwrap();
        assert_eq!(removed.operation, BulkOperation::Export(ExportFormat::Email));
        assert!(registry.unregister(EMAIL).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn descriptors_derive_capabilities_from_operation() {
        let registry = ActionRegistry::repository();
        assert_eq!(
            registry.get(UNPUBLISH).unwrap().required_capabilities(),
            &[Capability::Update, Capability::Unpublish]
        );
        assert_eq!(
            registry.get(UPDATE_ACCESS_CONTROL).unwrap().required_capabilities(),
            &[Capability::UpdateAccessControl]
        );
    }
}
