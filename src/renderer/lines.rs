//! Line geometry for the viewport: a ground grid and the posed transform
//! tree of the preview instance (bone links plus a small cross per joint).

use nalgebra_glm as glm;

use crate::renderer::LineVertex;
use crate::scene::SceneObject;

const GRID_EXTENT: i32 = 5;
const GRID_MINOR_COLOR: [f32; 3] = [0.22, 0.22, 0.24];
const AXIS_X_COLOR: [f32; 3] = [0.45, 0.20, 0.20];
const AXIS_Z_COLOR: [f32; 3] = [0.20, 0.25, 0.45];
const BONE_COLOR: [f32; 3] = [1.0, 0.62, 0.12];
const JOINT_COLOR: [f32; 3] = [1.0, 0.85, 0.45];
const JOINT_SIZE: f32 = 0.05;

/// One-unit grid on the ground plane, built once at startup.
pub fn grid_lines() -> Vec<LineVertex> {
    let mut vertices = Vec::new();
    let extent = GRID_EXTENT as f32;
    for i in -GRID_EXTENT..=GRID_EXTENT {
        let offset = i as f32;
        let (x_color, z_color) = if i == 0 {
            (AXIS_X_COLOR, AXIS_Z_COLOR)
        } else {
            (GRID_MINOR_COLOR, GRID_MINOR_COLOR)
        };
        vertices.push(LineVertex {
            position: [-extent, 0.0, offset],
            color: x_color,
        });
        vertices.push(LineVertex {
            position: [extent, 0.0, offset],
            color: x_color,
        });
        vertices.push(LineVertex {
            position: [offset, 0.0, -extent],
            color: z_color,
        });
        vertices.push(LineVertex {
            position: [offset, 0.0, extent],
            color: z_color,
        });
    }
    vertices
}

/// Rebuilt every frame from the instance's current pose.
pub fn skeleton_lines(root: &SceneObject) -> Vec<LineVertex> {
    let mut vertices = Vec::new();
    walk(root, &glm::Mat4::identity(), &mut vertices);
    vertices
}

fn walk(node: &SceneObject, parent_world: &glm::Mat4, out: &mut Vec<LineVertex>) {
    let world = parent_world * node.transform.matrix();
    let position = world_position(&world);
    push_joint_marker(position, out);

    for child in &node.children {
        let child_world = world * child.transform.matrix();
        out.push(LineVertex {
            position,
            color: BONE_COLOR,
        });
        out.push(LineVertex {
            position: world_position(&child_world),
            color: BONE_COLOR,
        });
        walk(child, &world, out);
    }
}

fn world_position(world: &glm::Mat4) -> [f32; 3] {
    let column = world.column(3);
    [column[0], column[1], column[2]]
}

fn push_joint_marker(position: [f32; 3], out: &mut Vec<LineVertex>) {
    for axis in 0..3 {
        let mut a = position;
        let mut b = position;
        a[axis] -= JOINT_SIZE;
        b[axis] += JOINT_SIZE;
        out.push(LineVertex {
            position: a,
            color: JOINT_COLOR,
        });
        out.push(LineVertex {
            position: b,
            color: JOINT_COLOR,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_vertex_count_matches_line_pairs() {
        let vertices = grid_lines();
        assert_eq!(vertices.len() % 2, 0);
        // (2*extent+1) lines per direction, two directions, two vertices each.
        assert_eq!(vertices.len(), (2 * GRID_EXTENT as usize + 1) * 4);
    }

    #[test]
    fn skeleton_links_follow_hierarchy() {
        let root = SceneObject::new("Root")
            .with_child(SceneObject::new("A").at(0.0, 1.0, 0.0))
            .with_child(SceneObject::new("B").at(1.0, 0.0, 0.0));
        let vertices = skeleton_lines(&root);
        // 3 joint markers (6 vertices each) + 2 bone links (2 vertices each).
        assert_eq!(vertices.len(), 3 * 6 + 2 * 2);
    }
}
