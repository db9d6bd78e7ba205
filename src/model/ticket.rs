//! Booking record shown on the ticket screen.

use super::view::{TicketView, ViewNode, TICKET_VIEW_ID};
use serde::{Deserialize, Serialize};

/// Nominal CSS width of the ticket screen.
const TICKET_WIDTH: u32 = 1000;

/// A confirmed flight booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub passenger_name: String,
    pub flight_number: String,
    pub airline_name: String,
    /// Logo URL
    #[serde(default)]
    pub airline_logo: String,
    pub departure: String,
    pub arrival: String,
    pub date: String,
    pub time: String,
    /// Booking reference
    pub tracking_number: String,
    pub trip: String,
    #[serde(alias = "tourtype")]
    pub tour_type: String,
    #[serde(alias = "passengerclass")]
    pub passenger_class: String,
}

impl Ticket {
    /// Parse a booking record from JSON.
    pub fn from_json(data: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Build the rendered ticket view.
    ///
    /// The tree carries the same text hierarchy as the ticket screen:
    /// header, route, details grid, booking reference and footer. The
    /// scroll height is a nominal value for the fixed layout.
    pub fn to_view(&self) -> TicketView {
        let header = ViewNode::div().with_children(vec![
            ViewNode::div().with_children(vec![
                ViewNode::image(self.airline_logo.as_str(), true),
                ViewNode::heading(1, self.airline_name.as_str()),
                ViewNode::div().with_child(ViewNode::text(format!("Flight {}", self.flight_number))),
            ]),
            ViewNode::div().with_children(vec![
                labelled("STATUS"),
                labelled("CONFIRMED"),
            ]),
        ]);

        let route = ViewNode::div().with_children(vec![
            ViewNode::heading(3, "Route Information"),
            endpoint("From", &self.departure, "Departure"),
            ViewNode::div().with_child(ViewNode::text("\u{2708}")),
            endpoint("To", &self.arrival, "Arrival"),
        ]);

        let details = ViewNode::element("section").with_children(vec![
            ViewNode::heading(3, "Flight Details"),
            endpoint("Date & Time", &self.date, &self.time),
            endpoint("Passenger", &self.passenger_name, &self.passenger_class),
            endpoint("Trip Details", &self.trip, &self.tour_type),
        ]);

        let reference = ViewNode::div().with_children(vec![
            ViewNode::heading(3, "Booking Reference"),
            labelled(&self.tracking_number),
            labelled("Please keep this reference for your records"),
        ]);

        let footer = ViewNode::div().with_children(vec![
            labelled("Aero Link - Your Trusted Travel Partner"),
            labelled(
                "Please present this ticket at check-in \u{2022} Valid ID required \u{2022} Terms and conditions apply",
            ),
        ]);

        let root = ViewNode::div()
            .with_id(TICKET_VIEW_ID)
            .with_children(vec![header, route, details, reference, footer]);

        let mut view = TicketView::new(TICKET_WIDTH, 640, root);
        if !self.tracking_number.trim().is_empty() {
            view = view.with_reference(self.tracking_number.trim());
        }
        view
    }
}

fn labelled(text: &str) -> ViewNode {
    ViewNode::div().with_child(ViewNode::text(text))
}

fn endpoint(label: &str, value: &str, caption: &str) -> ViewNode {
    ViewNode::div().with_children(vec![labelled(label), labelled(value), labelled(caption)])
}
