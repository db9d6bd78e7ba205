//! Text flow for the fallback document: title, rule, then paginated lines.

use super::metrics::text_width_mm;
use crate::config::ExportConfig;
use crate::model::{Align, Element, Font, PageContent};

/// Stroke width of the separator rule in points.
const RULE_WIDTH: f64 = 0.57;

/// Word-wrap a line so that each piece fits in `max_width_mm`.
///
/// Words wider than the limit are broken between characters. Returns the
/// input line unchanged when it already fits.
pub fn wrap_line(line: &str, font: Font, size_pt: f64, max_width_mm: f64) -> Vec<String> {
    if text_width_mm(font, size_pt, line) <= max_width_mm {
        return vec![line.to_string()];
    }

    let fits = |s: &str| text_width_mm(font, size_pt, s) <= max_width_mm;
    let mut out = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
            continue;
        }
        // Break an oversized word between characters.
        for c in word.chars() {
            let mut next = current.clone();
            next.push(c);
            if !current.is_empty() && !fits(&next) {
                out.push(std::mem::take(&mut current));
                current.push(c);
            } else {
                current = next;
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Lay out the fallback document.
///
/// Page one starts with the centered title and a separator rule. Body
/// lines follow at a fixed line height from `body_start_y`; before each
/// line, if the cursor has passed the printable bottom a new page starts
/// at `continuation_y`. Lines are atomic, so none straddles a page break;
/// with `wrap_long_lines` the pieces of one line move to a new page
/// together.
pub fn flow_lines(lines: &[String], config: &ExportConfig) -> Vec<PageContent> {
    let page_width = config.format.width_mm;
    let bottom = config.printable_bottom();

    let mut pages = Vec::new();
    let mut page = PageContent::new(1);

    page.push(Element::Text {
        x: page_width / 2.0,
        y: config.title_y,
        text: config.title.clone(),
        font: Font::HelveticaBold,
        size: config.title_font_size,
        align: Align::Center,
    });
    page.push(Element::Rule {
        x1: config.left_margin,
        y1: config.rule_y,
        x2: page_width - config.left_margin,
        y2: config.rule_y,
        width: RULE_WIDTH,
    });

    let mut y = config.body_start_y;
    for line in lines {
        let pieces = if config.wrap_long_lines {
            wrap_line(
                line,
                Font::Helvetica,
                config.body_font_size,
                config.printable_width(),
            )
        } else {
            vec![line.clone()]
        };

        // Pieces of one wrapped line stay on one page unless they cannot
        // fit on any page.
        let span = pieces.len().saturating_sub(1) as f64 * config.line_height;
        let top = if page.number == 1 {
            config.body_start_y
        } else {
            config.continuation_y
        };
        if y > bottom || (y + span > bottom && y > top) {
            y = next_page(&mut pages, &mut page, config);
        }

        for piece in pieces {
            if y > bottom {
                y = next_page(&mut pages, &mut page, config);
            }
            page.push(Element::Text {
                x: config.left_margin,
                y,
                text: piece,
                font: Font::Helvetica,
                size: config.body_font_size,
                align: Align::Left,
            });
            y += config.line_height;
        }
    }

    pages.push(page);
    log::debug!("flowed text into {} page(s)", pages.len());
    pages
}

fn next_page(pages: &mut Vec<PageContent>, page: &mut PageContent, config: &ExportConfig) -> f64 {
    let next = page.number + 1;
    pages.push(std::mem::replace(page, PageContent::new(next)));
    config.continuation_y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Line {}", i)).collect()
    }

    fn body_ys(page: &PageContent) -> Vec<f64> {
        page.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text {
                    y,
                    font: Font::Helvetica,
                    ..
                } => Some(*y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_page_header() {
        let config = ExportConfig::default();
        let pages = flow_lines(&[], &config);
        assert_eq!(pages.len(), 1);

        let page = &pages[0];
        assert_eq!(page.elements.len(), 2);
        match &page.elements[0] {
            Element::Text { x, y, text, align, font, .. } => {
                assert_eq!(*x, 105.0);
                assert_eq!(*y, 20.0);
                assert_eq!(text, "Aero Link - Flight Ticket");
                assert_eq!(*align, Align::Center);
                assert_eq!(*font, Font::HelveticaBold);
            }
            other => panic!("Expected title, got {:?}", other),
        }
        match &page.elements[1] {
            Element::Rule { x1, y1, x2, y2, .. } => {
                assert_eq!((*x1, *y1, *x2, *y2), (20.0, 30.0, 190.0, 30.0));
            }
            other => panic!("Expected rule, got {:?}", other),
        }
    }

    #[test]
    fn test_single_page_positions() {
        let config = ExportConfig::default();
        let pages = flow_lines(&lines(3), &config);
        assert_eq!(pages.len(), 1);
        assert_eq!(body_ys(&pages[0]), vec![50.0, 58.0, 66.0]);
    }

    #[test]
    fn test_pagination_boundary() {
        // A4: baselines 50, 58, ... 274 fit on page one (29 lines);
        // continuation pages hold 20..=276 (33 lines).
        let config = ExportConfig::default();

        let pages = flow_lines(&lines(29), &config);
        assert_eq!(pages.len(), 1);

        let pages = flow_lines(&lines(30), &config);
        assert_eq!(pages.len(), 2);
        assert_eq!(body_ys(&pages[1]), vec![20.0]);

        let pages = flow_lines(&lines(29 + 33 + 1), &config);
        assert_eq!(pages.len(), 3);
        assert_eq!(body_ys(&pages[1]).len(), 33);
        assert_eq!(pages[2].number, 3);
    }

    #[test]
    fn test_every_line_kept_in_order() {
        let config = ExportConfig::default();
        let input = lines(100);
        let pages = flow_lines(&input, &config);
        let out: Vec<&str> = pages
            .iter()
            .flat_map(|p| p.text_lines())
            .skip(1) // title
            .collect();
        let expected: Vec<&str> = input.iter().map(String::as_str).collect();
        assert_eq!(out, expected);

        for page in &pages {
            for y in body_ys(page) {
                assert!(y <= config.printable_bottom() + config.line_height);
            }
        }
    }

    #[test]
    fn test_wrap_line_fits_untouched() {
        let wrapped = wrap_line("Short line", Font::Helvetica, 12.0, 170.0);
        assert_eq!(wrapped, vec!["Short line"]);
    }

    #[test]
    fn test_wrap_line_breaks_words() {
        let long = "word ".repeat(60);
        let wrapped = wrap_line(long.trim(), Font::Helvetica, 12.0, 170.0);
        assert!(wrapped.len() > 1);
        for piece in &wrapped {
            assert!(text_width_mm(Font::Helvetica, 12.0, piece) <= 170.0);
        }
        assert_eq!(wrapped.join(" "), long.trim());
    }

    #[test]
    fn test_wrap_line_breaks_oversized_word() {
        let word = "W".repeat(80);
        let wrapped = wrap_line(&word, Font::Helvetica, 12.0, 50.0);
        assert!(wrapped.len() > 1);
        assert_eq!(wrapped.concat(), word);
        for piece in &wrapped {
            assert!(text_width_mm(Font::Helvetica, 12.0, piece) <= 50.0);
        }
    }

    #[test]
    fn test_long_lines_kept_whole_by_default() {
        let config = ExportConfig::default();
        let long = "x".repeat(400);
        let pages = flow_lines(&[long.clone()], &config);
        assert_eq!(pages[0].text_lines()[1], long);
    }

    #[test]
    fn test_wrapped_pieces_share_a_page() {
        let config = ExportConfig::default().with_wrapping(true);
        let mut input = lines(28);
        input.push("LONGLINE ".repeat(30).trim().to_string());
        let pages = flow_lines(&input, &config);

        assert_eq!(pages.len(), 2);
        assert_eq!(body_ys(&pages[0]).len(), 28);
        let ys = body_ys(&pages[1]);
        assert!(ys.len() > 1);
        assert_eq!(ys[0], config.continuation_y);
        assert!(pages[1].text_lines().iter().all(|l| l.starts_with("LONGLINE")));
    }

    #[test]
    fn test_wrapped_line_taller_than_a_page_still_flows() {
        let config = ExportConfig::default().with_wrapping(true);
        let huge = "W".repeat(2000);
        let pages = flow_lines(&[huge.clone()], &config);

        assert!(pages.len() > 1);
        let body: String = pages
            .iter()
            .flat_map(|p| p.text_lines())
            .skip(1)
            .collect();
        assert_eq!(body, huge);
        for page in &pages {
            for y in body_ys(page) {
                assert!(y <= config.printable_bottom());
            }
        }
    }
}
