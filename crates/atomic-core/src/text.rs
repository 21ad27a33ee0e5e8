//! Text layout: justification and greedy word wrap.

use crate::font::Font;

/// Pixel size of a single-line string in `font`.
#[inline]
pub fn text_size(font: Font, msg: &str) -> (i32, i32) {
    (font.width * msg.chars().count() as i32, font.height)
}

/// Top-left origin of a `w x h` box anchored at `(x, y)`.
///
/// `jx`/`jy` are justification factors in `[0, 1]`: 0 anchors the left/top
/// edge at the point, 0.5 the centre, 1 the right/bottom edge. Fractional
/// offsets truncate toward zero.
#[inline]
pub fn justified_origin(x: i32, y: i32, w: i32, h: i32, jx: f32, jy: f32) -> (i32, i32) {
    (x - (w as f32 * jx) as i32, y - (h as f32 * jy) as i32)
}

/// Greedy word wrap to a character budget.
///
/// The message splits on `'\n'` into paragraphs and each paragraph on
/// single spaces into words (runs of spaces collapse). The first word of a
/// line is taken unconditionally, so a word longer than the budget becomes
/// an overlong line rather than being split. Every paragraph flushes its
/// pending line even when empty, which preserves blank lines:
/// `"a\n\nb"` wraps to `["a", "", "b"]`.
pub fn wrap_text(msg: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    for paragraph in msg.split('\n') {
        for word in paragraph.split(' ') {
            if word.is_empty() {
                continue;
            }
            if pending.is_empty() {
                pending.push_str(word);
            } else if pending.chars().count() + 1 + word.chars().count() <= max_chars {
                pending.push(' ');
                pending.push_str(word);
            } else {
                lines.push(std::mem::take(&mut pending));
                pending.push_str(word);
            }
        }
        lines.push(std::mem::take(&mut pending));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_counts_glyph_cells() {
        assert_eq!(text_size(Font::LARGE, "PithOS"), (96, 32));
        assert_eq!(text_size(Font::SMALL, ""), (0, 16));
    }

    #[test]
    fn origin_justification() {
        assert_eq!(justified_origin(120, 0, 96, 32, 0.5, 0.0), (72, 0));
        assert_eq!(justified_origin(10, 10, 7, 7, 0.0, 0.0), (10, 10));
        assert_eq!(justified_origin(10, 10, 7, 7, 1.0, 1.0), (3, 3));
    }

    #[test]
    fn origin_truncates_fractional_offsets() {
        assert_eq!(justified_origin(10, 10, 5, 5, 0.5, 0.5), (8, 8));
    }

    #[test]
    fn wrap_packs_greedily() {
        assert_eq!(wrap_text("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap_text("ab cd", 5), vec!["ab cd"]);
        assert_eq!(wrap_text("ab cde", 5), vec!["ab", "cde"]);
    }

    #[test]
    fn wrap_never_splits_a_word() {
        assert_eq!(wrap_text("toolongword", 4), vec!["toolongword"]);
        assert_eq!(wrap_text("x toolongword y", 4), vec!["x", "toolongword", "y"]);
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("\n\n", 10), vec!["", "", ""]);
    }

    #[test]
    fn wrap_collapses_space_runs() {
        assert_eq!(wrap_text("a  b", 10), vec!["a b"]);
        assert_eq!(wrap_text(" lead", 10), vec!["lead"]);
    }
}
