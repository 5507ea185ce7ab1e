//! Font-backed text measurement.
//!
//! Layout code never touches the font database directly; it goes through
//! [`measure_text_width`] and falls back to a heuristic width table (see
//! `layout::text`) when no face can be resolved. That keeps the layout
//! backend-agnostic: any width function produces a valid chain layout.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static MEASURER: Lazy<Mutex<Measurer>> = Lazy::new(|| Mutex::new(Measurer::new()));

/// Measures `text` at `font_size` using the first resolvable family from the
/// CSS-style `font_family` list. Returns `None` when no face matches, so the
/// caller can fall back to heuristic metrics.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

/// Average advance of the ASCII letters, used to budget wrap widths.
pub fn average_char_width(font_family: &str, font_size: f32) -> Option<f32> {
    if font_size <= 0.0 {
        return None;
    }
    let sample = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let width = measure_text_width(sample, font_size, font_family)?;
    Some(width / sample.chars().count() as f32)
}

struct Measurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl Measurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get_mut(&key)?.as_mut()?;
        let normalized = text.replace('\t', "    ");
        Some(face.width(&normalized, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let families: Vec<Family<'_>> = if names.is_empty() {
            vec![Family::SansSerif]
        } else {
            names.iter().map(|name| resolve_family(name)).collect()
        };

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded = None;
        self.db.with_face_data(id, |data, index| {
            loaded = LoadedFace::parse(data.to_vec(), index);
        });
        loaded
    }
}

fn resolve_family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}

/// A parsed face plus a per-character advance cache. The font bytes are kept
/// so cache misses can re-parse; a miss is rare once the ASCII range is warm.
struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    advances: HashMap<char, Option<u16>>,
}

impl LoadedFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut advances = HashMap::with_capacity(96);
        for byte in 0x20u8..0x7f {
            let ch = byte as char;
            advances.insert(ch, glyph_advance(&face, ch));
        }
        Some(Self {
            data,
            index,
            units_per_em,
            advances,
        })
    }

    fn width(&mut self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = match self.advances.get(&ch) {
                Some(cached) => *cached,
                None => {
                    let advance = Face::parse(&self.data, self.index)
                        .ok()
                        .and_then(|face| glyph_advance(&face, ch));
                    self.advances.insert(ch, advance);
                    advance
                }
            };
            match advance {
                Some(units) => width += units as f32 * scale,
                None => width += fallback,
            }
        }
        width.max(0.0)
    }
}

fn glyph_advance(face: &Face<'_>, ch: char) -> Option<u16> {
    let glyph = face.glyph_index(ch)?;
    face.glyph_hor_advance(glyph)
}
