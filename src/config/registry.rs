//! Ordered model list shared by all service configs.

/// A model entry that can be addressed by its identifier.
pub trait ModelEntry {
    /// The caller-supplied identifier (`ID` in the file).
    fn id(&self) -> &str;
}

/// Config types that own an ordered list of model entries.
///
/// Identifiers are unique only by convention: nothing here rejects a
/// duplicate id, and [`remove_model`](ModelRegistry::remove_model) purges
/// every entry carrying the given id.
pub trait ModelRegistry {
    type Model: ModelEntry;

    fn models(&self) -> &[Self::Model];

    fn models_mut(&mut self) -> &mut Vec<Self::Model>;

    /// Append a fully built entry. Insertion order is kept on save.
    fn push_model(&mut self, model: Self::Model) {
        self.models_mut().push(model);
    }

    /// Remove all entries whose id equals `id`. Unknown ids are a no-op.
    fn remove_model(&mut self, id: &str) {
        let models = self.models_mut();
        let before = models.len();
        models.retain(|m| m.id() != id);
        log::debug!("removed {} model(s) with id {id:?}", before - models.len());
    }

    /// First entry with the given id.
    fn model(&self, id: &str) -> Option<&Self::Model> {
        self.models().iter().find(|m| m.id() == id)
    }

    /// Identifiers in insertion order.
    fn model_ids(&self) -> Vec<&str> {
        self.models().iter().map(|m| m.id()).collect()
    }
}
