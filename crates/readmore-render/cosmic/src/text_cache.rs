use lru::LruCache;
use readmore_ui_layout::{FontFamily, FontStyle, TextLayoutInput, TextLayoutResult};
use std::num::NonZeroUsize;

pub const TEXT_CACHE_INITIAL_CAPACITY: usize = 128;
pub const TEXT_CACHE_MAX_CAPACITY: usize = 4096;

/// Everything that influences one layout. Floats are keyed by their bits.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TextCacheKey {
    text: String,
    max_width_bits: u32,
    max_lines: i32,
    soft_wrap: bool,
    font_size_bits: Option<u32>,
    line_height_bits: Option<u32>,
    letter_spacing_bits: Option<u32>,
    font_weight: Option<u16>,
    italic: bool,
    family: Option<FontFamily>,
}

impl TextCacheKey {
    pub fn new(input: &TextLayoutInput<'_>) -> Self {
        let style = input.style;
        Self {
            text: input.text.to_string(),
            max_width_bits: input.max_width.to_bits(),
            max_lines: input.max_lines.to_raw(),
            soft_wrap: input.soft_wrap,
            font_size_bits: style.font_size.map(f32::to_bits),
            line_height_bits: style.line_height.map(f32::to_bits),
            letter_spacing_bits: style.letter_spacing.map(f32::to_bits),
            font_weight: style.font_weight.map(|weight| weight.0),
            italic: style.font_style == Some(FontStyle::Italic),
            family: style.font_family.clone(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub type TextLayoutCache = LruCache<TextCacheKey, TextLayoutResult>;

pub fn new_text_cache() -> TextLayoutCache {
    LruCache::new(
        NonZeroUsize::new(TEXT_CACHE_INITIAL_CAPACITY).unwrap_or(NonZeroUsize::MIN),
    )
}

/// Doubles the cache capacity up to [`TEXT_CACHE_MAX_CAPACITY`].
pub fn grow_text_cache(cache: &mut TextLayoutCache) {
    let current_cap = cache.cap().get();
    if current_cap >= TEXT_CACHE_MAX_CAPACITY {
        return;
    }

    let new_cap = (current_cap * 2)
        .max(TEXT_CACHE_INITIAL_CAPACITY)
        .min(TEXT_CACHE_MAX_CAPACITY);
    if let Some(capacity) = NonZeroUsize::new(new_cap) {
        log::debug!("growing text layout cache to {new_cap} entries");
        cache.resize(capacity);
    }
}
