//! Integration tests for text extraction from serialized views.

use ticketpdf::{extract_lines, extract_view_lines, ExportConfig, Ticket, TicketView};

const VIEW_JSON: &str = r#"{
    "id": "ticket",
    "scroll_width": 1000,
    "scroll_height": 640,
    "reference": "TRK123",
    "root": {
        "type": "element",
        "tag": "div",
        "id": "ticket",
        "children": [
            { "type": "element", "tag": "h1", "children": [ { "type": "text", "text": "  Aero Link  " } ] },
            { "type": "element", "tag": "div", "children": [ { "type": "text", "text": "Flight AL 204" } ] },
            {
                "type": "element", "tag": "div", "display": "none",
                "children": [ { "type": "text", "text": "debug panel" } ]
            },
            {
                "type": "element", "tag": "h2",
                "children": [
                    { "type": "text", "text": "Route " },
                    { "type": "text", "text": "Information" }
                ]
            },
            { "type": "element", "tag": "span", "visibility": "hidden", "children": [ { "type": "text", "text": "secret" } ] },
            { "type": "image", "src": "https://cdn.example/logo.png", "cors": true },
            { "type": "text", "text": "\n      " },
            { "type": "element", "tag": "p", "children": [ { "type": "text", "text": "LHR" } ] }
        ]
    }
}"#;

#[test]
fn test_extract_from_json_view() {
    let view = TicketView::from_json(VIEW_JSON).unwrap();
    let lines = extract_view_lines(&view, &ExportConfig::default());

    assert_eq!(
        lines,
        vec![
            "** Aero Link **",
            "Flight AL 204",
            "** Route Information **",
            "LHR",
        ]
    );
}

#[test]
fn test_hidden_text_never_leaks() {
    let view = TicketView::from_json(VIEW_JSON).unwrap();
    let lines = extract_lines(&view.root, "**");
    assert!(lines.iter().all(|l| !l.contains("secret") && !l.contains("debug")));
}

#[test]
fn test_extraction_is_pure() {
    let view = TicketView::from_json(VIEW_JSON).unwrap();
    let before = view.clone();
    let a = extract_lines(&view.root, "**");
    let b = extract_lines(&view.root, "**");
    assert_eq!(a, b);
    assert_eq!(view, before);
}

#[test]
fn test_ticket_view_lines() {
    let ticket = Ticket {
        passenger_name: "Ada Lovelace".into(),
        flight_number: "AL 204".into(),
        airline_name: "Aero Link".into(),
        airline_logo: String::new(),
        departure: "LHR".into(),
        arrival: "JFK".into(),
        date: "2024-05-01".into(),
        time: "09:30".into(),
        tracking_number: "TRK123".into(),
        trip: "One way".into(),
        tour_type: "Business".into(),
        passenger_class: "Economy".into(),
    };
    let lines = extract_view_lines(&ticket.to_view(), &ExportConfig::default());

    assert!(lines.contains(&"** Aero Link **".to_string()));
    assert!(lines.contains(&"** Route Information **".to_string()));
    assert!(lines.contains(&"** Booking Reference **".to_string()));
    assert!(lines.contains(&"Flight AL 204".to_string()));
    assert!(lines.contains(&"TRK123".to_string()));

    let route = lines.iter().position(|l| l == "** Route Information **").unwrap();
    let departure = lines.iter().position(|l| l == "LHR").unwrap();
    assert!(route < departure);
}
