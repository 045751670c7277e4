use image::imageops::FilterType;

/// Terminal columns an avatar occupies
pub const AVATAR_COLUMNS: u32 = 2;

/// Pixel rows an avatar is reduced to. Two pixel rows fit in one terminal line
/// when drawn with half blocks.
pub const AVATAR_PIXEL_ROWS: u32 = 2;

const PLACEHOLDER_RGB: [u8; 3] = [0x80, 0x80, 0x80];

#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    #[error("Failed to decode avatar image: {0}")]
    Decode(String),
}

/// Avatar image reduced to a few pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pixels: Vec<[u8; 3]>,
    placeholder: bool,
}

impl Avatar {
    /// Flat grey avatar shown until (or instead of) a decoded image.
    pub fn placeholder() -> Self {
        Self {
            pixels: vec![PLACEHOLDER_RGB; (AVATAR_COLUMNS * AVATAR_PIXEL_ROWS) as usize],
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Pixel at column `x`, pixel row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let index = (y * AVATAR_COLUMNS + x) as usize;
        self.pixels.get(index).copied().unwrap_or(PLACEHOLDER_RGB)
    }

    /// One `(top, bottom)` color pair per terminal column.
    pub fn cells(&self) -> Vec<([u8; 3], [u8; 3])> {
        (0..AVATAR_COLUMNS)
            .map(|x| (self.pixel(x, 0), self.pixel(x, 1)))
            .collect()
    }
}

/// Decode raw image bytes (PNG, JPEG or GIF) and shrink them to avatar size.
pub fn decode_avatar(bytes: &[u8]) -> Result<Avatar, AvatarError> {
    let image = image::load_from_memory(bytes).map_err(|e| AvatarError::Decode(e.to_string()))?;
    let small = image
        .resize_exact(AVATAR_COLUMNS, AVATAR_PIXEL_ROWS, FilterType::Triangle)
        .to_rgb8();

    Ok(Avatar {
        pixels: small.pixels().map(|p| p.0).collect(),
        placeholder: false,
    })
}

/// Like [`decode_avatar`], but undecodable bytes yield the placeholder.
pub fn decode_avatar_or_placeholder(bytes: &[u8]) -> Avatar {
    decode_avatar(bytes).unwrap_or_else(|_| Avatar::placeholder())
}
