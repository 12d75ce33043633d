use std::f32::consts::PI;

/// Root directory joined with each body's relative path.
pub const MODELS_ROOT: &str = "models";

/// A selectable body mesh.
pub struct BodyDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub path: &'static str,
    /// Orientation correction in radians, applied so feet face the ground (Y-up).
    pub rotation: [f32; 3],
}

impl BodyDescriptor {
    pub fn asset_path(&self) -> String {
        format!("{}/{}", MODELS_ROOT, self.path)
    }
}

pub const BODIES: &[BodyDescriptor] = &[
    BodyDescriptor {
        id: "human-body-01",
        name: "Human Body 01",
        path: "HumanBody01.obj",
        rotation: [-PI / 2.0, 0.0, 0.0],
    },
    BodyDescriptor {
        id: "human-body-02",
        name: "Human Body 02",
        path: "HumanBody02.obj",
        rotation: [-PI / 2.0, 0.0, PI],
    },
];
