//! Draw-list rendering
//!
//! Each tick the session is turned into a [`Frame`]: an ordered list of draw
//! commands plus the HUD state. Sprites come from the asset provider; when an
//! asset is missing the frame carries solid-color geometry instead. A
//! [`RenderSink`] presents the frame on whatever surface the host has.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::{DrawCommand, Frame, FrameSnapshot, LogRenderSink, RenderSink, build_frame};
pub use vertex::Vertex;
