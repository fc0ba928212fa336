use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use serde::Deserialize;
use serde::de::DeserializeSeed;

use crate::SerialError;
use crate::adapter::{AdapterSet, SpecialAdapter};
use crate::codec::{DecodeContext, EncodeContext, Outcome, ValueSeed};
use crate::format::{FormatBackend, FormatType};
use crate::graph::{Graph, Value};
use crate::info::Declared;
use crate::registry::TypeRegistry;

/// The default nesting limit of [`SerializerConfig`].
///
/// The built-in backends do not impose a lower limit of their own.
pub const DEFAULT_MAX_DEPTH: usize = 256;

// -----------------------------------------------------------------------------
// SerializerConfig

/// Options of a [`Serializer`].
///
/// Missing fields take their default, so the config can be embedded in
/// application configuration files:
///
/// ```
/// use og_serial::SerializerConfig;
///
/// let config: SerializerConfig = ron::from_str("(max_depth: Some(16))").unwrap();
/// assert!(config.include_type_hints);
/// assert_eq!(config.max_depth, Some(16));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Write discriminator tags for composites in polymorphic positions.
    ///
    /// When disabled, such composites are dropped and a polymorphic root fails.
    pub include_type_hints: bool,
    /// Maximum object nesting, `None` for unbounded.
    pub max_depth: Option<usize>,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            include_type_hints: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

// -----------------------------------------------------------------------------
// Decoded

/// The result of [`Serializer::deserialize`]: a fresh graph and its root value.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub graph: Graph,
    pub root: Value,
}

// -----------------------------------------------------------------------------
// Serializer

/// Encodes object graphs to bytes and back.
///
/// A `Serializer` owns its registry, adapters and format backend. It is
/// immutable after construction and can be shared between threads; every
/// call keeps its own identity tracking.
///
/// # Examples
///
/// ```
/// use og_serial::{Declared, FormatType, Graph, Object, Serializer, Value};
///
/// static NUMBERS: Declared = Declared::Sequence(&Declared::INT);
///
/// let mut graph = Graph::new();
/// let list = graph.insert(Object::Sequence(vec![Value::from(1), Value::from(2)]));
///
/// let serializer = Serializer::create(FormatType::Json, None, true);
/// let bytes = serializer.serialize(&graph, &list.into(), NUMBERS).unwrap();
/// assert_eq!(bytes, br#"{"@id":0,"@items":[1,2]}"#);
///
/// let decoded = serializer.deserialize(&bytes, NUMBERS).unwrap();
/// let id = decoded.root.as_object().unwrap();
/// assert_eq!(decoded.graph.get(id).unwrap().len(), 2);
/// ```
pub struct Serializer {
    backend: Box<dyn FormatBackend>,
    registry: Arc<TypeRegistry>,
    adapters: AdapterSet,
    config: SerializerConfig,
}

impl Serializer {
    /// Creates a serializer with the built-in adapters.
    ///
    /// `None` means an empty registry: only exactly-declared composites can
    /// then be written.
    pub fn create(
        format: FormatType,
        registry: Option<TypeRegistry>,
        include_type_hints: bool,
    ) -> Self {
        let mut builder = Self::builder(format).include_type_hints(include_type_hints);
        if let Some(registry) = registry {
            builder = builder.registry(registry);
        }
        builder.build()
    }

    /// Starts configuring a serializer for a built-in format.
    #[inline]
    pub fn builder(format: FormatType) -> SerializerBuilder {
        SerializerBuilder::new(format.backend())
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    #[inline]
    pub fn adapters(&self) -> &AdapterSet {
        &self.adapters
    }

    /// The name of the format backend.
    #[inline]
    pub fn format_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Encodes the graph reachable from `root`.
    ///
    /// Composites that cannot be written in their position are dropped, see
    /// the [crate documentation](crate). Nothing is returned on failure.
    ///
    /// # Errors
    ///
    /// - [`SerialError::UnsupportedRootType`] if the root itself would be dropped.
    /// - [`SerialError::DepthExceeded`] if nesting exceeds the configured limit.
    /// - [`SerialError::Format`] if the backend fails.
    pub fn serialize(
        &self,
        graph: &Graph,
        root: &Value,
        declared: Declared,
    ) -> Result<Vec<u8>, SerialError> {
        let format = self.backend.name();
        log::trace!("encoding a `{}` root as {format}", declared.describe());

        let ctx = EncodeContext::new(
            graph,
            &self.registry,
            &self.adapters,
            self.config.include_type_hints,
            self.config.max_depth,
        );
        let root = ctx.root(root, declared)?;
        let bytes = self
            .backend
            .encode(&root)
            .map_err(|err| ctx.take_failure().unwrap_or(err))?;

        log::trace!(
            "encoded {} objects into {} bytes of {format}",
            ctx.objects_written(),
            bytes.len(),
        );
        Ok(bytes)
    }

    /// Decodes a graph written by [`serialize`](Self::serialize).
    ///
    /// Elements of unknown type are skipped; shared and cyclic references
    /// resolve to single instances of the new graph.
    ///
    /// # Errors
    ///
    /// - [`SerialError::UnsupportedRootType`] if the root names an unknown type,
    ///   or is an untagged composite in a polymorphic position.
    /// - [`SerialError::DanglingReference`] if a reference precedes its object.
    /// - [`SerialError::DepthExceeded`] if nesting exceeds the configured limit.
    /// - [`SerialError::Malformed`] or [`SerialError::Format`] for invalid input.
    pub fn deserialize(&self, bytes: &[u8], declared: Declared) -> Result<Decoded, SerialError> {
        let format = self.backend.name();
        log::trace!(
            "decoding {} bytes of {format} as a `{}` root",
            bytes.len(),
            declared.describe()
        );

        let mut ctx = DecodeContext::new(&self.registry, &self.adapters, self.config.max_depth);
        let mut outcome = None;

        let result = self.backend.decode(
            bytes,
            &mut |de: &mut dyn erased_serde::Deserializer<'_>| {
                outcome = Some(ValueSeed::root(&mut ctx, declared).deserialize(de)?);
                Ok(())
            },
        );
        if let Err(err) = result {
            return Err(ctx.take_failure().unwrap_or(err));
        }

        let root = match outcome {
            Some(Outcome::Value(root)) => root,
            Some(Outcome::Skipped) => {
                return Err(SerialError::unsupported_root(declared.describe().to_string()));
            }
            None => return Err(SerialError::malformed("no root value")),
        };

        let graph = ctx.into_graph();
        log::trace!("decoded {} objects from {format}", graph.len());
        Ok(Decoded { graph, root })
    }
}

impl core::fmt::Debug for Serializer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Serializer")
            .field("format", &self.backend.name())
            .field("registry", &self.registry)
            .field("adapters", &self.adapters)
            .field("config", &self.config)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// SerializerBuilder

/// Configures a [`Serializer`].
///
/// # Examples
///
/// ```
/// use og_serial::{FormatType, Serializer, SerializerConfig};
/// use og_serial::registry::TypeRegistry;
///
/// let serializer = Serializer::builder(FormatType::Ron)
///     .registry(TypeRegistry::new())
///     .max_depth(Some(32))
///     .build();
///
/// assert_eq!(serializer.format_name(), "ron");
/// assert_eq!(serializer.config().max_depth, Some(32));
/// ```
pub struct SerializerBuilder {
    backend: Box<dyn FormatBackend>,
    registry: Arc<TypeRegistry>,
    adapters: AdapterSet,
    config: SerializerConfig,
}

impl SerializerBuilder {
    /// Starts from a custom backend, an empty registry and the built-in adapters.
    pub fn new(backend: Box<dyn FormatBackend>) -> Self {
        Self {
            backend,
            registry: Arc::new(TypeRegistry::new()),
            adapters: AdapterSet::builtin(),
            config: SerializerConfig::default(),
        }
    }

    /// Sets the type registry. Accepts an owned or shared registry.
    #[must_use]
    pub fn registry(mut self, registry: impl Into<Arc<TypeRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }

    #[must_use]
    pub fn config(mut self, config: SerializerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn include_type_hints(mut self, enabled: bool) -> Self {
        self.config.include_type_hints = enabled;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, limit: Option<usize>) -> Self {
        self.config.max_depth = limit;
        self
    }

    /// Adds an adapter. It takes precedence over the built-ins.
    #[must_use]
    pub fn adapter(mut self, adapter: impl SpecialAdapter) -> Self {
        self.adapters.insert(adapter);
        self
    }

    /// Replaces the format backend.
    #[must_use]
    pub fn backend(mut self, backend: Box<dyn FormatBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn build(self) -> Serializer {
        Serializer {
            backend: self.backend,
            registry: self.registry,
            adapters: self.adapters,
            config: self.config,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Serializer, SerializerConfig};
    use crate::format::FormatType;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable() {
        assert_send_sync::<Serializer>();
    }

    #[test]
    fn config_defaults() {
        let config: SerializerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SerializerConfig::default());

        let config: SerializerConfig =
            serde_json::from_str(r#"{"include_type_hints": false, "max_depth": null}"#).unwrap();
        assert!(!config.include_type_hints);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn create_keeps_flags() {
        let serializer = Serializer::create(FormatType::Json, None, false);
        assert!(!serializer.config().include_type_hints);
        assert!(serializer.registry().is_empty());
        assert_eq!(serializer.adapters().len(), 2);
    }
}
