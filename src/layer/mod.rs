//! Paint pipeline for the decorated icon.
//!
//! Each layer encapsulates a configuration, version tracking for cache
//! invalidation, and a per-size image cache. The element hands every layer a
//! fresh configuration on each paint; only configurations that actually
//! differ bump the version and throw away cached pixels.
//!
//! # Architecture
//!
//! Each layer config implements [`LayerEffect`], which defines:
//! - How the layer draws itself onto the canvas
//! - Which upstream layers its cached output depends on

pub mod badge;
pub mod cutout;
pub mod svg;

pub use badge::BadgeConfig;
pub use cutout::CutoutConfig;
pub use svg::SvgSource;

use std::collections::HashMap;

use tracing::trace;

use crate::icon::{IconImage, SizePx};

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the rendering pipeline.
pub struct RenderContext {
    /// The canvas being painted, sized to the host box times the device scale.
    pub image: IconImage,
}

impl RenderContext {
    /// Creates a new render context with the given canvas.
    pub fn new(image: IconImage) -> Self {
        Self { image }
    }
}

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer configuration types.
///
/// Implementations must detect when a configuration meaningfully differs
/// from another, which drives cache invalidation.
pub trait LayerConfig: Clone {
    /// Returns true if this config differs from another in a way that
    /// would produce different rendering output.
    fn differs_from(&self, other: &Self) -> bool;
}

/// Trait for layer configurations that know how to apply themselves.
pub trait LayerEffect: LayerConfig {
    /// Returns the dependency version for cache invalidation.
    ///
    /// Layers that draw over upstream output must include the upstream
    /// versions. Root layers return `DependencyVersion::NONE`.
    fn dependencies(versions: &LayerVersions) -> DependencyVersion;

    /// Draws onto `ctx.image`.
    fn transform(&self, ctx: &mut RenderContext);
}

// ============================================================================
// Layer Dependencies
// ============================================================================

/// Represents the combined version of upstream layer dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DependencyVersion(u64);

impl DependencyVersion {
    /// No dependencies (root layer).
    pub const NONE: Self = Self(0);

    /// Creates a dependency version from a single version number.
    pub fn from_version(version: u64) -> Self {
        Self(version)
    }

    /// Combines multiple upstream layer versions into one.
    pub fn combine(versions: &[u64]) -> Self {
        Self(versions.iter().fold(0u64, |acc, v| acc.wrapping_add(*v)))
    }
}

/// Snapshot of all layer versions in the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct LayerVersions {
    /// Version of the masked icon layer.
    pub cutout: u64,
    /// Version of the badge layer.
    pub badge: u64,
}

// ============================================================================
// CacheKey
// ============================================================================

/// Key for cached rendered images.
///
/// Uses width, height, and device scale (as integer bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    width: u32,
    height: u32,
    scale_bits: u32,
}

impl CacheKey {
    /// Creates a cache key for the given dimensions and scale.
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale_bits: scale.to_bits(),
        }
    }
}

// ============================================================================
// Generic Layer
// ============================================================================

/// A generic layer with configuration, caching, and version tracking.
///
/// The layer tracks:
/// - Optional configuration of type `C` (no config means the layer is skipped)
/// - A version number that increments on any state change
/// - A cache of rendered images keyed by size, tagged with the dependency
///   version they were rendered against
pub struct Layer<C: LayerConfig> {
    config: Option<C>,
    version: u64,
    cache: HashMap<CacheKey, (IconImage, u64)>,
}

impl<C: LayerConfig> Default for Layer<C> {
    fn default() -> Self {
        Self {
            config: None,
            version: 0,
            cache: HashMap::new(),
        }
    }
}

impl<C: LayerConfig> Layer<C> {
    /// Returns true if this layer will draw.
    pub fn is_active(&self) -> bool {
        self.config.is_some()
    }

    /// Returns the current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the configuration. Returns true if it changed.
    ///
    /// Clears the cache and increments version if the config differs.
    pub fn set_config(&mut self, config: Option<C>) -> bool {
        let differs = match (&self.config, &config) {
            (None, None) => false,
            (Some(_), None) | (None, Some(_)) => true,
            (Some(old), Some(new)) => old.differs_from(new),
        };

        if differs {
            self.config = config;
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Invalidates the cache and increments version.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache.clear();
    }

    /// Gets a cached image if valid for the given key and dependency version.
    pub fn get_cached(&self, key: CacheKey, deps: DependencyVersion) -> Option<&IconImage> {
        self.cache
            .get(&key)
            .and_then(|(img, stored_dep)| (*stored_dep == deps.0).then_some(img))
    }

    /// Stores an image in the cache with the current dependency version.
    pub fn store(&mut self, key: CacheKey, image: IconImage, deps: DependencyVersion) {
        self.cache.insert(key, (image, deps.0));
    }
}

impl<C: LayerEffect> Layer<C> {
    /// Apply this layer to the render context, using cache if valid.
    ///
    /// Without a configuration the context passes through unchanged.
    pub fn apply(&mut self, ctx: &mut RenderContext, key: CacheKey, versions: &LayerVersions) {
        if !self.is_active() {
            return;
        }

        let deps = C::dependencies(versions);

        if let Some(cached) = self.get_cached(key, deps) {
            trace!(version = self.version, "layer cache hit");
            ctx.image = cached.clone();
            return;
        }

        let Some(config) = self.config.as_ref() else {
            return;
        };
        config.transform(ctx);

        self.store(key, ctx.image.clone(), deps);
    }
}

// ============================================================================
// Composite Layer
// ============================================================================

/// A cache-only layer for final composited images.
///
/// Unlike [`Layer<C>`], this has no configuration. It purely caches the final
/// output and is invalidated when any upstream layer changes.
#[derive(Default)]
pub struct CompositeLayer {
    version: u64,
    cache: HashMap<CacheKey, (IconImage, u64)>,
}

impl CompositeLayer {
    /// Returns the current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Invalidates the cache and increments version.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache.clear();
    }

    /// Gets a cached image if valid for the given key and dependency version.
    pub fn get_cached(&self, key: CacheKey, deps: DependencyVersion) -> Option<&IconImage> {
        self.cache
            .get(&key)
            .and_then(|(img, stored_dep)| (*stored_dep == deps.0).then_some(img))
    }

    /// Stores an image in the cache with the current dependency version.
    pub fn store(&mut self, key: CacheKey, image: IconImage, deps: DependencyVersion) {
        self.cache.insert(key, (image, deps.0));
    }
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The two paint layers and the composite cache.
///
/// # Dependency Graph
///
/// ```text
/// Transparent canvas (host box x device scale)
///     │
///     ▼
/// ┌─────────┐
/// │ Cutout  │ ◄── No dependencies (root layer): icon with the hole punched
/// └────┬────┘
///      │
///      ▼
/// ┌─────────┐
/// │  Badge  │ ◄── Depends on: Cutout (draws over its output)
/// └────┬────┘
///      │
///      ▼
/// ┌─────────────┐
/// │  Composite  │ ◄── Depends on: Cutout + Badge
/// └─────────────┘
/// ```
#[derive(Default)]
pub struct LayerPipeline {
    /// Masked icon layer.
    pub cutout: Layer<CutoutConfig>,

    /// Scaled, corner-anchored badge layer.
    pub badge: Layer<BadgeConfig>,

    /// Composite cache (depends on all layers).
    pub composite: CompositeLayer,
}

impl LayerPipeline {
    /// Returns a snapshot of all layer versions.
    pub fn layer_versions(&self) -> LayerVersions {
        LayerVersions {
            cutout: self.cutout.version(),
            badge: self.badge.version(),
        }
    }

    /// Invalidates all caches.
    pub fn invalidate_all(&mut self) {
        self.cutout.invalidate();
        self.badge.invalidate();
        self.composite.invalidate();
    }

    fn composite_dependencies(&self) -> DependencyVersion {
        DependencyVersion::combine(&[self.cutout.version(), self.badge.version()])
    }

    /// Paints a canvas of `size` device pixels at device `scale`.
    ///
    /// Checks the composite cache, otherwise runs each layer in order over a
    /// transparent canvas and caches the result.
    pub fn render(&mut self, size: SizePx, scale: f32) -> IconImage {
        let key = CacheKey::new(size.width, size.height, scale);
        let composite_deps = self.composite_dependencies();

        if let Some(cached) = self.composite.get_cached(key, composite_deps) {
            trace!("composite cache hit");
            return cached.clone();
        }

        let mut ctx = RenderContext::new(IconImage::transparent(size, scale));

        let versions = self.layer_versions();
        self.cutout.apply(&mut ctx, key, &versions);
        self.badge.apply(&mut ctx, key, &versions);

        self.composite.store(key, ctx.image.clone(), composite_deps);

        ctx.image
    }
}
