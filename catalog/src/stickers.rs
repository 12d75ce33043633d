/// Root directory joined with each sticker's relative path.
pub const TATTOOS_ROOT: &str = "tattoos";

/// A sticker design in the catalog grid.
pub struct StickerDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    /// `None` marks a blank grid slot that cannot start a placement.
    pub path: Option<&'static str>,
}

impl StickerDescriptor {
    pub fn asset_path(&self) -> Option<String> {
        self.path.map(|p| format!("{}/{}", TATTOOS_ROOT, p))
    }
}

macro_rules! sticker {
    ($n:literal) => {
        StickerDescriptor {
            id: concat!("sticker-", $n),
            name: $n,
            path: Some(concat!($n, ".png")),
        }
    };
}

macro_rules! blank_slot {
    ($id:literal) => {
        StickerDescriptor {
            id: $id,
            name: "",
            path: None,
        }
    };
}

pub const STICKERS: &[StickerDescriptor] = &[
    sticker!("001"),
    sticker!("002"),
    sticker!("003"),
    sticker!("004"),
    sticker!("005"),
    sticker!("006"),
    sticker!("007"),
    sticker!("008"),
    sticker!("009"),
    sticker!("010"),
    sticker!("011"),
    sticker!("012"),
    sticker!("013"),
    sticker!("014"),
    sticker!("015"),
    sticker!("016"),
    sticker!("017"),
    sticker!("018"),
    sticker!("019"),
    sticker!("020"),
    sticker!("021"),
    sticker!("022"),
    sticker!("023"),
    sticker!("024"),
    sticker!("025"),
    blank_slot!("sticker-blank-26"),
    blank_slot!("sticker-blank-27"),
];
