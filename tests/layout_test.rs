//! Integration tests for placement and text pagination.

use ticketpdf::layout::{flow_lines, metrics::text_width_mm, Placement};
use ticketpdf::model::{Element, Font};
use ticketpdf::{ExportConfig, Orientation, PageFormat};

#[test]
fn test_placement_centered_on_all_formats() {
    let formats = [
        PageFormat::a4(),
        PageFormat::letter(),
        PageFormat::a4().oriented(Orientation::Landscape),
    ];
    for format in formats {
        for (w, h) in [(2000.0, 1280.0), (640.0, 4000.0), (1.0, 1.0), (3000.0, 3000.0)] {
            let p = Placement::fit(format.width_mm, format.height_mm, w, h, 0.95).unwrap();
            let scale = (format.width_mm / w).min(format.height_mm / h) * 0.95;

            assert!((p.scale - scale).abs() <= scale * 1e-12);
            assert!((p.x - (format.width_mm - p.width) / 2.0).abs() < 1e-9);
            assert!((p.y - (format.height_mm - p.height) / 2.0).abs() < 1e-9);
            assert!(p.fits_within(format.width_mm, format.height_mm));
        }
    }
}

#[test]
fn test_pagination_never_splits_lines() {
    let config = ExportConfig::default();
    let lines: Vec<String> = (0..120).map(|i| format!("Booking line {}", i)).collect();
    let pages = flow_lines(&lines, &config);

    assert!(pages.len() > 1);
    let body: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.text_lines())
        .filter(|l| *l != config.title)
        .collect();
    assert_eq!(body.len(), lines.len());
    for (got, want) in body.iter().zip(&lines) {
        assert_eq!(got, want);
    }

    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.number as usize, i + 1);
        let first_y = page
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Text {
                    y,
                    font: Font::Helvetica,
                    ..
                } => Some(*y),
                _ => None,
            })
            .unwrap();
        let expected = if i == 0 {
            config.body_start_y
        } else {
            config.continuation_y
        };
        assert_eq!(first_y, expected);
    }
}

#[test]
fn test_title_and_rule_only_on_first_page() {
    let config = ExportConfig::default();
    let lines: Vec<String> = (0..40).map(|i| i.to_string()).collect();
    let pages = flow_lines(&lines, &config);

    let rules = |i: usize| {
        pages[i]
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Rule { .. }))
            .count()
    };
    assert_eq!(rules(0), 1);
    assert_eq!(rules(1), 0);
    assert_eq!(pages[0].text_lines()[0], "Aero Link - Flight Ticket");
}

#[test]
fn test_long_lines_wrapped_within_margins() {
    let config = ExportConfig::default().with_wrapping(true);
    let long = "Please present this ticket at check-in with a valid ID. ".repeat(6);
    let pages = flow_lines(&[long.trim().to_string()], &config);

    let body: Vec<&str> = pages[0].text_lines().into_iter().skip(1).collect();
    assert!(body.len() > 1);
    for line in body {
        assert!(text_width_mm(Font::Helvetica, config.body_font_size, line) <= config.printable_width());
    }
}

#[test]
fn test_wrapped_line_never_split_across_pages() {
    let config = ExportConfig::default().with_wrapping(true);
    let long = "Seat and baggage details for this booking ".repeat(8);
    for lead in 20..40 {
        let mut lines: Vec<String> = (0..lead).map(|i| format!("Line {}", i)).collect();
        lines.push(long.trim().to_string());
        let pages = flow_lines(&lines, &config);

        let holding: Vec<usize> = pages
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.text_lines()
                    .iter()
                    .any(|l| *l != config.title && !l.starts_with("Line "))
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(holding.len(), 1, "lead {} split the wrapped line", lead);
    }
}

#[test]
fn test_flow_is_deterministic() {
    let config = ExportConfig::default();
    let lines: Vec<String> = (0..50).map(|i| format!("row {}", i)).collect();
    assert_eq!(flow_lines(&lines, &config), flow_lines(&lines, &config));
}
