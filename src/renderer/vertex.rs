//! Vertex types for 2D fallback shapes

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors used when an asset is missing
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const PLATFORM_NORMAL: [f32; 4] = rgb(0, 200, 0);
    pub const PLATFORM_FRAGILE: [f32; 4] = rgb(200, 0, 0);
    pub const PLATFORM_TELEPORT: [f32; 4] = rgb(128, 0, 128);
    pub const BALL: [f32; 4] = rgb(0, 0, 255);
    pub const BACKGROUND_DAY: [f32; 4] = rgb(255, 255, 255);
    pub const BACKGROUND_NIGHT: [f32; 4] = rgb(30, 30, 30);

    // HUD
    pub const TEXT: [f32; 4] = rgb(0, 0, 0);
    pub const TEXT_ALERT: [f32; 4] = rgb(255, 0, 0);
    pub const TEXT_HINT: [f32; 4] = rgb(0, 0, 255);
}
