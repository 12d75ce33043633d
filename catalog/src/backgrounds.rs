/// Root directory joined with each background's relative path.
pub const BGS_ROOT: &str = "bgs";

/// Background selected on first entry when present in the catalog.
pub const DEFAULT_BACKGROUND_ID: &str = "sky4k";

/// A selectable equirectangular background panorama.
pub struct BackgroundDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    /// `None` marks a placeholder slot that cannot be selected.
    pub path: Option<&'static str>,
}

impl BackgroundDescriptor {
    pub fn asset_path(&self) -> Option<String> {
        self.path.map(|p| format!("{}/{}", BGS_ROOT, p))
    }
}

pub const BACKGROUNDS: &[BackgroundDescriptor] = &[
    BackgroundDescriptor {
        id: "sky4k",
        name: "Sky",
        path: Some("sky4k.hdr"),
    },
    BackgroundDescriptor {
        id: "studio",
        name: "Studio",
        path: Some("studio_small.hdr"),
    },
];
