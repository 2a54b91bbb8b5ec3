use serde::{Deserialize, Serialize};

/// Axis-aligned box for one perimeter wall, expressed as pure data for
/// an external scene builder. The core never constructs geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

/// Lays out four walls hugging the edges of a terrain patch that spans
/// (0, 0) to (size_x, size_z), each centered at half the wall height.
pub fn perimeter_walls(
    size_x: f32,
    size_z: f32,
    wall_height: f32,
    wall_thickness: f32,
) -> [WallSpec; 4] {
    let half_height = wall_height / 2.0;
    let half_thickness = wall_thickness / 2.0;

    [
        // Front and back run along the x axis.
        WallSpec {
            center: [size_x / 2.0, half_height, -half_thickness],
            size: [size_x, wall_height, wall_thickness],
        },
        WallSpec {
            center: [size_x / 2.0, half_height, size_z + half_thickness],
            size: [size_x, wall_height, wall_thickness],
        },
        // Left and right run along the z axis.
        WallSpec {
            center: [-half_thickness, half_height, size_z / 2.0],
            size: [wall_thickness, wall_height, size_z],
        },
        WallSpec {
            center: [size_x + half_thickness, half_height, size_z / 2.0],
            size: [wall_thickness, wall_height, size_z],
        },
    ]
}
