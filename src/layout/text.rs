use crate::config::LayoutConfig;
use crate::text_metrics;
use crate::theme::Theme;

use super::TextBlock;

/// Word-wraps and measures a block label against the configured wrap width.
pub(super) fn measure_label(text: &str, theme: &Theme, config: &LayoutConfig) -> TextBlock {
    measure_label_with_font_size(
        text,
        theme.font_size,
        theme.font_family.as_str(),
        config,
        true,
    )
}

pub(super) fn measure_label_with_font_size(
    text: &str,
    font_size: f32,
    font_family: &str,
    config: &LayoutConfig,
    wrap: bool,
) -> TextBlock {
    let fast = config.fast_text_metrics;
    let max_width_px = config.max_label_width_chars.max(1) as f32
        * average_char_width(font_family, font_size, fast);

    let mut lines = Vec::new();
    for line in split_lines(text) {
        if wrap {
            lines.extend(wrap_line(&line, max_width_px, font_size, font_family, fast));
        } else {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    let width = lines
        .iter()
        .map(|line| text_width(line, font_size, font_family, fast))
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * font_size * config.label_line_height;

    TextBlock {
        lines,
        width,
        height,
    }
}

pub(super) fn split_lines(text: &str) -> Vec<String> {
    text.replace("\\n", "\n")
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

pub(super) fn wrap_line(
    line: &str,
    max_width: f32,
    font_size: f32,
    font_family: &str,
    fast: bool,
) -> Vec<String> {
    if text_width(line, font_size, font_family, fast) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size, font_family, fast) > max_width {
            if !current.is_empty() {
                lines.push(current.clone());
                current.clear();
            }
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast: bool) -> f32 {
    if fast {
        return heuristic_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| heuristic_text_width(text, font_size))
}

fn average_char_width(font_family: &str, font_size: f32, fast: bool) -> f32 {
    if fast {
        return font_size * 0.56;
    }
    text_metrics::average_char_width(font_family, font_size).unwrap_or(font_size * 0.56)
}

fn heuristic_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

/// Coarse advance factors for a typical sans face. Only used when no real
/// font can be measured, so buckets beat precision here.
pub(super) fn char_width_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | 'I' | '!' | '|' | '.' | ',' | ':' | ';' | '\'' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.36,
        ' ' => 0.31,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' => 0.92,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.60,
        _ => 0.55,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_handles_escaped_newlines() {
        assert_eq!(split_lines("a\\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn split_lines_trims_whitespace() {
        assert_eq!(split_lines("  hello  \n  world  "), vec!["hello", "world"]);
    }

    #[test]
    fn char_width_factor_is_positive() {
        for ch in ['a', 'Z', ' ', '0', '@', 'i', '\u{4e2d}'] {
            assert!(char_width_factor(ch) > 0.0, "char {ch:?} has zero width");
        }
    }

    #[test]
    fn heuristic_width_scales_with_font_size() {
        let w16 = heuristic_text_width("Hello", 16.0);
        let w32 = heuristic_text_width("Hello", 32.0);
        assert!((w32 - w16 * 2.0).abs() < 0.01);
    }

    #[test]
    fn wrap_line_keeps_short_text_intact() {
        let result = wrap_line("short", 1000.0, 16.0, "sans-serif", true);
        assert_eq!(result, vec!["short"]);
    }

    #[test]
    fn wrap_line_splits_long_text() {
        let result = wrap_line(
            "this is a rather long line that should be wrapped",
            100.0,
            16.0,
            "sans-serif",
            true,
        );
        assert!(result.len() > 1, "expected wrapping, got {result:?}");
    }

    #[test]
    fn measure_label_produces_nonempty_block() {
        let theme = Theme::modern();
        let config = LayoutConfig::default();
        let block = measure_label("Hello world", &theme, &config);
        assert!(!block.lines.is_empty());
        assert!(block.width > 0.0);
        assert!(block.height > 0.0);
    }

    #[test]
    fn measure_label_empty_string_produces_single_line() {
        let theme = Theme::modern();
        let config = LayoutConfig::default();
        let block = measure_label("", &theme, &config);
        assert_eq!(block.lines.len(), 1);
        assert!(block.height > 0.0);
    }

    #[test]
    fn longer_label_is_taller_once_it_wraps() {
        let theme = Theme::classic();
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let short = measure_label("Build", &theme, &config);
        let long = measure_label(
            "Build the artifacts and push them to the staging registry",
            &theme,
            &config,
        );
        assert!(long.height > short.height);
    }
}
