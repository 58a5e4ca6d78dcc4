//! [`TextMeasurer`] backed by cosmic-text shaping.
//!
//! Layouts are cached per [`TextCacheKey`]; the collapse resolver measures the
//! same paragraph repeatedly while the width is stable, so hits are common.

mod text_cache;

pub use text_cache::{
    grow_text_cache, new_text_cache, TextCacheKey, TextLayoutCache, TEXT_CACHE_INITIAL_CAPACITY,
    TEXT_CACHE_MAX_CAPACITY,
};

use cosmic_text::{
    fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight, Wrap,
};
use readmore_ui_layout::{
    CaretStop, FontFamily, FontStyle, LineMetrics, ResolvedTextDirection, TextLayoutInput,
    TextLayoutResult, TextMeasurer, TextStyle,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DEFAULT_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_LINE_HEIGHT_FACTOR: f32 = 1.2;

#[derive(Clone)]
pub struct CosmicTextMeasurer {
    font_system: Arc<Mutex<FontSystem>>,
    text_cache: Arc<Mutex<TextLayoutCache>>,
    glyph_cache: Arc<Mutex<HashMap<GlyphKey, bool>>>,
}

/// Glyph coverage depends on the face, not on size or spacing.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct GlyphKey {
    ch: char,
    family: Option<FontFamily>,
    weight: Option<u16>,
    italic: bool,
}

impl GlyphKey {
    fn new(ch: char, style: &TextStyle) -> Self {
        Self {
            ch,
            family: style.font_family.clone(),
            weight: style.font_weight.map(|weight| weight.0),
            italic: style.font_style == Some(FontStyle::Italic),
        }
    }
}

impl CosmicTextMeasurer {
    /// Measurer over the system font collection.
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new())
    }

    /// Measurer that only knows the given font files.
    pub fn from_fonts<I>(fonts: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut db = fontdb::Database::new();
        for data in fonts {
            db.load_font_data(data);
        }
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()));
        if let Some(family) = family {
            db.set_sans_serif_family(family);
        }
        Self::with_font_system(FontSystem::new_with_locale_and_db("en-US".to_string(), db))
    }

    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self::shared(Arc::new(Mutex::new(font_system)))
    }

    /// Shares a font system with a renderer that already owns one.
    pub fn shared(font_system: Arc<Mutex<FontSystem>>) -> Self {
        Self {
            font_system,
            text_cache: Arc::new(Mutex::new(new_text_cache())),
            glyph_cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn font_system(&self) -> Arc<Mutex<FontSystem>> {
        Arc::clone(&self.font_system)
    }

    pub fn has_fonts(&self) -> bool {
        self.lock_font_system().db().faces().next().is_some()
    }

    pub fn cached_layouts(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn cached_glyph_checks(&self) -> usize {
        self.lock_glyph_cache().len()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
        self.lock_glyph_cache().clear();
    }

    fn lock_font_system(&self) -> MutexGuard<'_, FontSystem> {
        self.font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_cache(&self) -> MutexGuard<'_, TextLayoutCache> {
        self.text_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_glyph_cache(&self) -> MutexGuard<'_, HashMap<GlyphKey, bool>> {
        self.glyph_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn shape_glyph(&self, ch: char, style: &TextStyle) -> bool {
        let mut font_system = self.lock_font_system();
        let mut buffer = Buffer::new(&mut font_system, metrics(style));
        buffer.set_size(&mut font_system, None, None);
        let mut encoded = [0u8; 4];
        buffer.set_text(
            &mut font_system,
            ch.encode_utf8(&mut encoded),
            attrs(style),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut font_system, false);
        let found = buffer
            .layout_runs()
            .flat_map(|run| run.glyphs.iter())
            .any(|glyph| glyph.glyph_id != 0);
        if !found {
            log::debug!("no font provides a glyph for {ch:?}");
        }
        found
    }
}

impl Default for CosmicTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CosmicTextMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicTextMeasurer")
            .field("cached_layouts", &self.cached_layouts())
            .finish_non_exhaustive()
    }
}

impl TextMeasurer for CosmicTextMeasurer {
    fn measure(&self, input: &TextLayoutInput<'_>) -> TextLayoutResult {
        let key = TextCacheKey::new(input);

        {
            let cache = self.lock_cache();
            if let Some(layout) = cache.peek(&key) {
                return layout.clone();
            }
        }

        let layout = {
            let mut font_system = self.lock_font_system();
            shape_paragraphs(&mut font_system, input)
        };

        {
            let mut cache = self.lock_cache();
            if cache.len() == cache.cap().get() {
                grow_text_cache(&mut cache);
            }
            cache.put(key, layout.clone());
        }

        layout
    }

    fn has_glyph(&self, ch: char, style: &TextStyle) -> bool {
        let key = GlyphKey::new(ch, style);
        if let Some(found) = self.lock_glyph_cache().get(&key) {
            return *found;
        }
        let found = self.shape_glyph(ch, style);
        self.lock_glyph_cache().insert(key, found);
        found
    }
}

fn metrics(style: &TextStyle) -> Metrics {
    let font_size = style.font_size.unwrap_or(DEFAULT_FONT_SIZE).max(1.0);
    let line_height = style
        .line_height
        .unwrap_or(font_size * DEFAULT_LINE_HEIGHT_FACTOR)
        .max(1.0);
    Metrics::new(font_size, line_height)
}

fn attrs(style: &TextStyle) -> Attrs<'_> {
    let family = match &style.font_family {
        Some(FontFamily::Serif) => Family::Serif,
        Some(FontFamily::Monospace) => Family::Monospace,
        Some(FontFamily::Named(name)) => Family::Name(name),
        Some(FontFamily::SansSerif) | None => Family::SansSerif,
    };
    let mut attrs = Attrs::new().family(family);
    if let Some(weight) = style.font_weight {
        attrs = attrs.weight(Weight(weight.0));
    }
    if style.font_style == Some(FontStyle::Italic) {
        attrs = attrs.style(Style::Italic);
    }
    attrs
}

/// Glyph cluster in absolute byte offsets.
struct Cluster {
    start: usize,
    end: usize,
    x: f32,
    w: f32,
    rtl: bool,
}

struct Row {
    paragraph: usize,
    start: usize,
    top: f32,
    rtl: bool,
    clusters: Vec<Cluster>,
}

/// Byte offset of every buffer line. Breaks at `\r\n`, `\n` and a lone `\r`,
/// the same terminators cosmic-text splits paragraphs on.
fn paragraph_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = vec![0];
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\r' if bytes.get(index + 1) == Some(&b'\n') => {
                index += 2;
                starts.push(index);
            }
            b'\r' | b'\n' => {
                index += 1;
                starts.push(index);
            }
            _ => index += 1,
        }
    }
    starts
}

fn shape_paragraphs(font_system: &mut FontSystem, input: &TextLayoutInput<'_>) -> TextLayoutResult {
    let text = input.text;
    let metrics = metrics(input.style);
    let wraps = input.soft_wrap && input.has_bounded_width();

    let mut buffer = Buffer::new(font_system, metrics);
    buffer.set_wrap(font_system, if wraps { Wrap::WordOrGlyph } else { Wrap::None });
    buffer.set_size(font_system, wraps.then(|| input.max_width.max(0.0)), None);
    buffer.set_text(font_system, text, attrs(input.style), Shaping::Advanced);
    buffer.shape_until_scroll(font_system, false);

    let starts = paragraph_starts(text);
    let mut rows: Vec<Row> = Vec::new();
    for run in buffer.layout_runs() {
        let base = starts.get(run.line_i).copied().unwrap_or(text.len());
        let clusters: Vec<Cluster> = run
            .glyphs
            .iter()
            .map(|glyph| Cluster {
                start: base + glyph.start,
                end: base + glyph.end,
                x: glyph.x,
                w: glyph.w,
                rtl: glyph.level.is_rtl(),
            })
            .collect();
        let start = clusters
            .iter()
            .map(|cluster| cluster.start)
            .min()
            .unwrap_or(base);
        rows.push(Row {
            paragraph: run.line_i,
            start,
            top: run.line_top,
            rtl: run.rtl,
            clusters,
        });
    }

    // Line ends come from the following row, so resolve them before capping.
    let mut ends: Vec<usize> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| match rows.get(index + 1) {
            Some(next) if next.paragraph == row.paragraph => next.start,
            _ => starts
                .get(row.paragraph + 1)
                .copied()
                .unwrap_or(text.len()),
        })
        .collect();

    let exceeded_max_lines = !input.max_lines.allows(rows.len());
    if let Some(limit) = input.max_lines.limit() {
        rows.truncate(limit);
        ends.truncate(limit);
    }

    let mut lines = Vec::with_capacity(rows.len());
    let mut carets = Vec::new();
    for (index, (row, &end)) in rows.iter().zip(&ends).enumerate() {
        let visible_end = text
            .get(row.start..end)
            .map_or(row.start, |slice| row.start + slice.trim_end().len());

        let (left, right) = row
            .clusters
            .iter()
            .filter(|cluster| cluster.start < visible_end)
            .fold(None, |bounds: Option<(f32, f32)>, cluster| {
                let (left, right) = bounds.unwrap_or((cluster.x, cluster.x + cluster.w));
                Some((left.min(cluster.x), right.max(cluster.x + cluster.w)))
            })
            .unwrap_or((0.0, 0.0));
        let direction = if row.rtl {
            ResolvedTextDirection::Rtl
        } else {
            ResolvedTextDirection::Ltr
        };
        let trailing_x = if row.rtl { left } else { right };

        let first_caret = carets.len();
        for cluster in &row.clusters {
            push_cluster_carets(text, cluster, &mut carets);
        }
        let mut covered: Vec<usize> = carets[first_caret..]
            .iter()
            .map(|caret| caret.offset)
            .collect();
        covered.sort_unstable();
        if let Some(slice) = text.get(row.start..end) {
            for (offset, _) in slice.char_indices() {
                let offset = row.start + offset;
                if covered.binary_search(&offset).is_err() {
                    carets.push(CaretStop {
                        offset,
                        x: trailing_x,
                    });
                }
            }
        }
        if index + 1 == rows.len() {
            carets.push(CaretStop {
                offset: end,
                x: trailing_x,
            });
        }

        lines.push(LineMetrics {
            start: row.start,
            end,
            visible_end,
            left,
            width: right - left,
            top: row.top,
            bottom: row.top + metrics.line_height,
            direction,
        });
    }
    carets.sort_by_key(|caret| caret.offset);
    carets.dedup_by_key(|caret| caret.offset);

    let width = if input.has_bounded_width() {
        input.max_width
    } else {
        lines.iter().map(LineMetrics::right).fold(0.0, f32::max)
    };
    TextLayoutResult::new(text.len(), lines, carets, width, exceeded_max_lines)
}

/// Spreads the cluster advance evenly over the chars it covers.
fn push_cluster_carets(text: &str, cluster: &Cluster, carets: &mut Vec<CaretStop>) {
    let Some(slice) = text.get(cluster.start..cluster.end) else {
        return;
    };
    let count = slice.chars().count().max(1) as f32;
    for (index, (offset, _)) in slice.char_indices().enumerate() {
        let advance = cluster.w * index as f32 / count;
        let x = if cluster.rtl {
            cluster.x + cluster.w - advance
        } else {
            cluster.x + advance
        };
        carets.push(CaretStop {
            offset: cluster.start + offset,
            x,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_starts_follow_line_feeds() {
        assert_eq!(paragraph_starts("one\ntwo\n\nthree"), vec![0, 4, 8, 9]);
        assert_eq!(paragraph_starts(""), vec![0]);
    }

    #[test]
    fn paragraph_starts_follow_carriage_returns() {
        assert_eq!(paragraph_starts("one\rtwo\r\nthree\n"), vec![0, 4, 9, 15]);
        assert_eq!(paragraph_starts("\r\r"), vec![0, 1, 2]);
    }

    #[test]
    fn glyph_checks_are_cached_per_face() {
        let measurer = CosmicTextMeasurer::new();
        if !measurer.has_fonts() {
            return;
        }
        let style = TextStyle::default();
        let first = measurer.has_glyph(readmore_ui_layout::ELLIPSIS, &style);
        let sized = TextStyle::default().with_font_size(30.0);
        assert_eq!(measurer.has_glyph(readmore_ui_layout::ELLIPSIS, &sized), first);
        assert_eq!(measurer.cached_glyph_checks(), 1);

        measurer.has_glyph('a', &style);
        assert_eq!(measurer.cached_glyph_checks(), 2);
    }

    #[test]
    fn cluster_carets_are_interpolated() {
        let text = "ffi";
        let mut carets = Vec::new();
        push_cluster_carets(
            text,
            &Cluster {
                start: 0,
                end: 3,
                x: 10.0,
                w: 30.0,
                rtl: false,
            },
            &mut carets,
        );
        let xs: Vec<f32> = carets.iter().map(|caret| caret.x).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);

        carets.clear();
        push_cluster_carets(
            text,
            &Cluster {
                start: 0,
                end: 3,
                x: 10.0,
                w: 30.0,
                rtl: true,
            },
            &mut carets,
        );
        let xs: Vec<f32> = carets.iter().map(|caret| caret.x).collect();
        assert_eq!(xs, vec![40.0, 30.0, 20.0]);
    }

    #[test]
    fn metrics_fall_back_to_default_size() {
        let style = TextStyle::default();
        let metrics = metrics(&style);
        assert_eq!(metrics.font_size, DEFAULT_FONT_SIZE);
        assert!((metrics.line_height - DEFAULT_FONT_SIZE * DEFAULT_LINE_HEIGHT_FACTOR).abs() < 1e-4);

        let style = TextStyle::default().with_font_size(20.0).with_line_height(30.0);
        let metrics = super::metrics(&style);
        assert_eq!(metrics.line_height, 30.0);
    }

    #[test]
    fn repeated_measurement_hits_cache() {
        let measurer = CosmicTextMeasurer::new();
        if !measurer.has_fonts() {
            return;
        }
        let style = TextStyle::default();
        let input = TextLayoutInput::new("cache me", &style, 200.0);

        let first = measurer.measure(&input);
        let second = measurer.measure(&input);
        assert_eq!(first, second);
        assert_eq!(measurer.cached_layouts(), 1);

        measurer.measure(&TextLayoutInput::new("cache me", &style, 100.0));
        assert_eq!(measurer.cached_layouts(), 2);

        measurer.clear_cache();
        assert_eq!(measurer.cached_layouts(), 0);
    }

    #[test]
    fn line_feeds_respect_max_lines() {
        let measurer = CosmicTextMeasurer::new();
        if !measurer.has_fonts() {
            return;
        }
        let style = TextStyle::default();
        let layout = measurer
            .measure(&TextLayoutInput::new("one\ntwo\nthree", &style, 400.0).with_max_lines(2));

        assert_eq!(layout.line_count(), 2);
        assert!(layout.did_exceed_max_lines());
        let first = layout.lines()[0];
        assert_eq!((first.start, first.end, first.visible_end), (0, 4, 3));
        assert_eq!(layout.lines()[1].start, 4);
        assert!(layout.lines()[1].top >= first.bottom - 0.01);
    }

    #[test]
    fn narrow_width_wraps_and_lines_fit() {
        let measurer = CosmicTextMeasurer::new();
        if !measurer.has_fonts() {
            return;
        }
        let style = TextStyle::default();
        let text = "the quick brown fox jumps over the lazy dog";
        let layout = measurer.measure(&TextLayoutInput::new(text, &style, 80.0));

        assert!(layout.line_count() > 1);
        for line in layout.lines() {
            assert!(line.start <= line.visible_end && line.visible_end <= line.end);
            assert!(line.right() <= 80.0 + 0.5, "{line:?}");
        }
        assert_eq!(layout.lines().last().map(|line| line.end), Some(text.len()));
    }
}
