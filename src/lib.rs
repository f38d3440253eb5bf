//! Procedural shading core for a real-time rasterization engine.
//!
//! The crate holds the per-vertex and per-fragment math that turns scene
//! data into pixel colors: the geometry transformer shared by every
//! program, the multi-light illumination accumulator, the material
//! evaluator and the rounded-rectangle shape field. Everything is written
//! as pure functions over explicit parameters so the core stays testable
//! without a graphics context; window management, resource upload and draw
//! scheduling are intentionally kept outside the crate.
//!
//! The wire-facing side (uniform and instance layouts, bind-group
//! descriptors and the embedded WGSL programs) mirrors the same math for
//! the GPU path.

pub mod camera;
pub mod geometry;
pub mod instance;
pub mod light;
pub mod lighting;
pub mod material;
pub mod shade;
pub mod shaders;
pub mod shape;
pub mod transform;
pub mod vertex;

pub use camera::{Camera, CameraUniform};
pub use geometry::{transform_flat, transform_lit, FlatVertex, LitVertex};
pub use instance::{MeshInstanceRaw, ShapeInstance, ShapeInstanceRaw};
pub use light::{Light, LightRaw, LightRig};
pub use lighting::{illuminate, SurfacePoint};
pub use material::{AlphaMode, Material, MaterialError, SurfaceSamples};
pub use shade::{evaluate_material, FragmentColor};
pub use shape::{edge_signal, shade_shape, BorderWidths, CornerRadii, ShapeMode, ShapeStyle};
pub use transform::Transform;
pub use vertex::Vertex;
